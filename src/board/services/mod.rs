//! Application services for board management.

mod boards;

pub use boards::{BoardService, BoardServiceError, BoardServiceResult, CreateBoardRequest};
