mod arena;
mod handle;
mod node;
mod raw_bst_map;
mod size;

pub(crate) use raw_bst_map::RawBstMap;
