//! CLI command implementations.
//!
//! Each submodule owns one command family:
//!
//! | Module     | Commands handled                       |
//! |------------|----------------------------------------|
//! | `project`  | `project show`                         |
//! | `phase`    | `phase add/update/delete`              |
//! | `task`     | `task add/update/delete`               |
//! | `progress` | `progress add/update/delete`           |
//! | `doc`      | `doc list/upload/ocr/aisles/download`  |

pub mod doc;
pub mod phase;
pub mod progress;
pub mod project;
pub mod task;

pub use doc::{cmd_doc_aisles, cmd_doc_download, cmd_doc_list, cmd_doc_ocr, cmd_doc_upload};
pub use phase::{cmd_phase_add, cmd_phase_delete, cmd_phase_update};
pub use progress::{cmd_progress_add, cmd_progress_delete, cmd_progress_update};
pub use project::cmd_project_show;
pub use task::{cmd_task_add, cmd_task_delete, cmd_task_update};
