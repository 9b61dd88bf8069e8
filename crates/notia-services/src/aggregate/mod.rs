mod service;

pub use service::UploadAggregator;
pub(crate) use service::assemble_view;
