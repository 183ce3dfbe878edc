use crate::error::AppError;
use crate::model::TaskRecord;

mod line_store;

pub use line_store::{LineStore, SCHEMA_VERSION, store_path};

/// Persistence gateway consumed by the task store. A save cycle is
/// `prepare`, one `write` per record in order, then `commit`; records staged
/// in a cycle become visible to a later `load_all` all at once or not at
/// all.
pub trait PersistenceGateway {
    fn prepare(&mut self) -> Result<(), AppError>;
    fn write(&mut self, record: &TaskRecord) -> Result<(), AppError>;
    fn commit(&mut self) -> Result<(), AppError>;
    fn load_all(&self) -> Result<Vec<TaskRecord>, AppError>;
}
