pub mod auto_loader;
pub mod loader;

pub use auto_loader::AutoListSource;
#[cfg(feature = "async")]
pub use loader::{download_public_suffix_list_async, AsyncListSource};
pub use loader::{
    download_public_suffix_list, verify_list_file, verify_list_text, FileListSource, ListSource,
    MemoryListSource, NilListSource, DEFAULT_LIST_FILENAME, DEFAULT_UPDATE_INTERVAL,
    PUBLIC_SUFFIX_LIST_URL,
};
