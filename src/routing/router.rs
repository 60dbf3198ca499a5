use crate::models::Role;
use crate::session::SessionSnapshot;

/// The client's route table. The guard and router only ever hand out these
/// constants, so redirect targets are fixed at compile time.
pub mod routes {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    /// Shared entry point; resolves per role via `dashboard_redirect`.
    pub const DASHBOARD: &str = "/dashboard";

    pub const PATIENT_DASHBOARD: &str = "/patient/dashboard";
    pub const PATIENT_PROFILE: &str = "/patient/profile";
    pub const PATIENT_APPOINTMENTS: &str = "/patient/appointments";
    pub const PATIENT_REPORTS: &str = "/patient/reports";
    pub const PATIENT_PRESCRIPTIONS: &str = "/patient/prescriptions";

    pub const DOCTOR_DASHBOARD: &str = "/doctor/dashboard";

    pub const LAB_DASHBOARD: &str = "/lab/dashboard";
    pub const LAB_PROFILE: &str = "/lab/profile";

    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
}

/// Landing route for a role. Total over every input: an unrecognized role
/// lands on home, an absent session on login.
pub fn landing_route(role: Option<&Role>) -> &'static str {
    match role {
        Some(Role::Patient) => routes::PATIENT_DASHBOARD,
        Some(Role::Doctor) => routes::DOCTOR_DASHBOARD,
        Some(Role::LabAssistant) => routes::LAB_DASHBOARD,
        Some(Role::Admin) => routes::ADMIN_DASHBOARD,
        Some(Role::Unknown(_)) => routes::HOME,
        None => routes::LOGIN,
    }
}

/// Resolve the shared "/dashboard" entry point from a session snapshot:
/// unauthenticated visitors go to login, everyone else to their landing.
pub fn dashboard_redirect(session: &SessionSnapshot) -> &'static str {
    if !session.authenticated {
        return routes::LOGIN;
    }
    landing_route(session.role.as_ref())
}
