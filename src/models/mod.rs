pub mod response;
pub mod todo;

pub use response::{ApiResponse, PaginatedResponse, Pagination, PaginationQuery, paginate};
pub use todo::{CreateTodoRequest, MAX_TITLE_LEN, Todo, UpdateTodoRequest, validate_title};
