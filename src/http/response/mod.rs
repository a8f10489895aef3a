mod sha_response;
mod state;

pub use sha_response::FileShaResponse;

pub use state::AsyncFrom;
pub use state::Json;
pub use state::Raw;
pub use state::Response;
