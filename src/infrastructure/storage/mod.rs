mod object_store_sink;
mod store_factory;

pub use object_store_sink::ObjectStoreSink;
pub use store_factory::StorageSinkFactory;
