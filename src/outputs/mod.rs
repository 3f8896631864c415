//! Output generation modules for JSON and Markdown.
//!
//! # Submodules
//!
//! - [`json`]: Persists reports and analysis results as JSON files
//! - [`markdown`]: Renders a digest of reports for reading
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 西昌卫星发射中心成功发射新型通信卫星.json
//!     └── 乡村振兴.json
//! ```

pub mod json;
pub mod markdown;
