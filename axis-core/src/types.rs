/// Position of a phytomer on its axis, counted from the lowest leaf.
///
/// Ranks start at `1` for the oldest (lowest) leaf and end at the phytomer
/// count for the youngest (highest) one.
pub type PhytomerRank = usize;
