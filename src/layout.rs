pub(crate) mod rings;
pub mod tier;
pub mod venn;
