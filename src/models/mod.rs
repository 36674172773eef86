pub mod message;
pub mod response;

pub use message::Message;
pub use response::{
    ClearData, ClearLogsData, ErrorResponse, InitData, LogEntry, LogsData, SendData, StatusData,
    SuccessResponse,
};
