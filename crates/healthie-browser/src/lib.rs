pub mod appointments;
pub mod chrome;
pub mod driver;
pub mod patients;
pub mod profile;
pub mod session;
mod wait;

pub use appointments::create_appointment;
pub use chrome::ChromeBrowser;
pub use driver::{BrowserDriver, BrowserHandle, PageDriver};
pub use patients::find_patient;
pub use profile::SessionProfile;
pub use session::{Session, SessionManager};
