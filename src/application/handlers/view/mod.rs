//! View handlers.

mod commit_page;

pub use commit_page::CommitPageHandler;
