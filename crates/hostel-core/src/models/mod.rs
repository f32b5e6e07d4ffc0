//! Entity records returned by the backend, and the edit forms built from them.
//!
//! Every field except `id` is optional: the backend omits nulls inconsistently
//! and a single odd record must not fail a whole collection.

pub mod attendance;
pub mod cleaning;
pub mod complaint;
pub mod date;
pub mod food;
pub mod forms;
pub mod payment;
pub mod resident;
pub mod room;
pub mod visit;

pub use attendance::{Attendance, AttendanceStats, AttendanceStatus};
pub use cleaning::{CleaningTask, CompletionStatus};
pub use complaint::{Complaint, ComplaintPriority, ComplaintStatus};
pub use food::{FoodPreference, FoodStats};
pub use forms::{AttendanceForm, CleaningForm, PaymentForm, ResidentForm, RoomForm};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use resident::{Resident, ResidentStatus};
pub use room::{Room, RoomStatus};
pub use visit::{Visit, VisitStatus};
