/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod package_page;
mod route;

pub use output_format::OutputFormat;
pub use package_page::PackagePage;
pub use route::Route;
