use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn host(&self) -> String;
    fn port(&self) -> u16;
    /// `None` keeps bookings in memory only.
    fn bookings_file(&self) -> Option<PathBuf>;
    fn database_url(&self) -> Option<String>;
    fn notification_url(&self) -> Option<String>;
}
