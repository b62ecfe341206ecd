/// Network adapters for the jar hell REST backend
mod caching_package_repository;
mod jar_hell_client;

pub use caching_package_repository::CachingPackageRepository;
pub use jar_hell_client::{JarHellClient, DEFAULT_TIMEOUT_SECS};
