use serde::{Deserialize, Serialize};

/// Status code attached to a freshly persisted record.
pub const STATUS_CREATED: u16 = 201;

/// Status code attached to a successful read.
pub const STATUS_OK: u16 = 200;

/// The `{ data, statusCode }` envelope returned by the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub data: T,
    pub status_code: u16,
}

impl<T> SuccessResponse<T> {
    /// Wraps `data` with status 201.
    pub fn created(data: T) -> Self {
        Self {
            data,
            status_code: STATUS_CREATED,
        }
    }

    /// Wraps `data` with status 200.
    pub fn ok(data: T) -> Self {
        Self {
            data,
            status_code: STATUS_OK,
        }
    }
}
