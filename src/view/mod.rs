pub mod render;

pub use render::{render, render_record, write_results_csv};
