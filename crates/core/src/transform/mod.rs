/// Comment detection and removal, standard and custom.
pub mod comments;
/// One-liner condensing.
pub mod condense;
/// Heuristic indentation formatter.
pub mod beautify;
/// Reversal and comment listing.
pub mod inspect;
