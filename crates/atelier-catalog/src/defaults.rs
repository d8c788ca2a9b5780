//! Fixed reference catalogs
//!
//! Loaded once at startup and passed explicitly into the seeder; never
//! relied on as ambient global state.

use atelier_common::model::{
    FeatureDefinition, PermissionDefinition, Plan, PlanFeatureGrant, RolePermissionGrant,
    StudioRole,
};

/// Immutable catalog: flag list, permission list, role matrix
#[derive(Debug, Clone)]
pub struct Catalog {
    flags: Vec<FeatureDefinition>,
    permissions: Vec<PermissionDefinition>,
    granted_by_role: Vec<(StudioRole, Vec<String>)>,
}

fn flag(code: &str, name: &str, description: &str) -> FeatureDefinition {
    FeatureDefinition {
        code: code.into(),
        name: name.into(),
        description: Some(description.into()),
    }
}

fn perm(code: &str, name: &str, description: &str) -> PermissionDefinition {
    PermissionDefinition {
        code: code.into(),
        name: name.into(),
        description: Some(description.into()),
    }
}

impl Catalog {
    /// The built-in catalog shipped with the platform
    pub fn builtin() -> Self {
        let flags = vec![
            flag("templates.premium", "Premium templates", "Unlocks the premium template library."),
            flag("domains.custom", "Custom domain", "Serve the studio site from its own domain."),
            flag("whatsapp.automation", "WhatsApp automation", "Quick replies and message triggers."),
            flag("marketplace.addons", "Add-on marketplace", "Enables first-party add-ons."),
            flag("seo.programmatic", "Programmatic SEO", "City/style landing pages plus sitemap."),
            flag("studio.multiuser", "Multi-user studio", "Team seats and member management."),
            flag("analytics.cohorts", "Cohort analytics", "7/14/30-day cohort reports."),
        ];

        let permissions = vec![
            perm("billing.manage", "Manage billing", "Checkout, portal, and cancellation."),
            perm("domain.manage", "Manage domain", "Request and verify a custom domain."),
            perm("team.manage", "Manage team", "Invites, removal, and role changes."),
            perm("content.write", "Edit content", "Projects, testimonials, studio profile."),
            perm("leads.write", "Manage leads", "Quote requests and the pipeline board."),
            perm("analytics.view", "View reports", "Metrics and dashboards."),
        ];

        let full: Vec<String> = permissions.iter().map(|p| p.code.clone()).collect();
        let staff: Vec<String> = ["content.write", "leads.write", "analytics.view"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        Self {
            flags,
            permissions,
            granted_by_role: vec![
                (StudioRole::Owner, full.clone()),
                (StudioRole::Admin, full),
                (StudioRole::Staff, staff),
            ],
        }
    }

    /// Flag definitions
    pub fn flags(&self) -> &[FeatureDefinition] {
        &self.flags
    }

    /// Permission definitions
    pub fn permissions(&self) -> &[PermissionDefinition] {
        &self.permissions
    }

    /// Exhaustive (role, permission) rows: grants and explicit denials.
    /// Every permission code gets a row for every role.
    pub fn role_grants(&self) -> Vec<RolePermissionGrant> {
        let mut rows = Vec::with_capacity(self.granted_by_role.len() * self.permissions.len());
        for (role, granted) in &self.granted_by_role {
            for permission in &self.permissions {
                rows.push(RolePermissionGrant {
                    role: *role,
                    perm_code: permission.code.clone(),
                    allowed: granted.iter().any(|code| code == &permission.code),
                });
            }
        }
        rows
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn plan(
    code: &str,
    name: &str,
    quotas: (Option<u32>, Option<u32>, Option<u32>, Option<u32>),
    premium_templates: bool,
) -> Plan {
    Plan {
        code: code.into(),
        name: name.into(),
        max_projects: quotas.0,
        max_testimonials: quotas.1,
        max_monthly_requests: quotas.2,
        max_users: quotas.3,
        premium_templates,
        active: true,
    }
}

/// Built-in plan presets
///
/// Reference data for provisioning and tests; plan rows themselves are owned
/// by billing workflows, so the seeder never writes them.
pub fn builtin_plans() -> Vec<Plan> {
    vec![
        plan("starter", "Starter", (Some(6), Some(10), Some(20), Some(1)), false),
        plan("pro", "Pro", (Some(30), Some(100), Some(200), Some(5)), true),
        plan("agency", "Agency", (None, None, None, None), true),
    ]
}

/// Default plan → flag grants for the built-in presets
pub fn builtin_plan_grants() -> Vec<PlanFeatureGrant> {
    let granted: [(&str, &[&str]); 3] = [
        ("starter", &[]),
        (
            "pro",
            &[
                "templates.premium",
                "domains.custom",
                "whatsapp.automation",
                "studio.multiuser",
            ],
        ),
        (
            "agency",
            &[
                "templates.premium",
                "domains.custom",
                "whatsapp.automation",
                "marketplace.addons",
                "seo.programmatic",
                "studio.multiuser",
                "analytics.cohorts",
            ],
        ),
    ];

    let mut rows = Vec::new();
    for (plan_code, flags) in granted {
        for flag_code in flags {
            rows.push(PlanFeatureGrant {
                plan_code: plan_code.into(),
                flag_code: (*flag_code).into(),
                enabled: true,
            });
        }
    }
    rows
}
