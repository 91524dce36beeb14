pub mod list_import;
pub mod starter_pack_merge;

pub use list_import::{import_list_to_target, run_import};
pub use starter_pack_merge::merge_starter_packs;
