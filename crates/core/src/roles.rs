//! Well-known staff role and service slug constants.
//!
//! Role strings must match the `ck_employees_role` constraint; slugs must
//! match the seeded catalog.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TUTOR: &str = "tutor";
pub const ROLE_PSYCHOLOGIST: &str = "psychologist";

/// Service slugs with a fixed staff role requirement.
pub const SERVICE_TUTORING: &str = "tutoring";
pub const SERVICE_THERAPY: &str = "therapy";
pub const SERVICE_STUDENT_PLAN: &str = "student-plan";

/// The staff role a service's sessions must be delivered by, if the service
/// restricts one. Combined plans resolve per track, not via their own slug.
pub fn required_role(service_slug: &str) -> Option<&'static str> {
    match service_slug {
        SERVICE_TUTORING => Some(ROLE_TUTOR),
        SERVICE_THERAPY => Some(ROLE_PSYCHOLOGIST),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutoring_requires_tutor() {
        assert_eq!(required_role(SERVICE_TUTORING), Some(ROLE_TUTOR));
    }

    #[test]
    fn therapy_requires_psychologist() {
        assert_eq!(required_role(SERVICE_THERAPY), Some(ROLE_PSYCHOLOGIST));
    }

    #[test]
    fn combined_plan_has_no_single_role() {
        assert_eq!(required_role(SERVICE_STUDENT_PLAN), None);
    }
}
