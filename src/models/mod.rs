pub mod loaders;
pub mod review;
pub mod selectors;

pub use loaders::{load_batch_file, load_url_list, parse_url_lines};
pub use review::ReviewRecord;
pub use selectors::{Field, FieldSelectors, SelectorChain, TextTransform};
