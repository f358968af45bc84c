mod home;
mod installation;
mod models;
mod progress_tracker;
mod section;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use installation::InstallationView;
pub use models::ModelsView;
pub use progress_tracker::ProgressTracker;
pub use section::SectionView;
