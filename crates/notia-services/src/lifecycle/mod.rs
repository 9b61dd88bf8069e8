mod service;

pub use service::UploadLifecycleService;
