// Reusable UI pieces shared by the pages
pub mod chart;
pub mod controls;
pub mod feedback;
pub mod layout;
pub mod visualization;
