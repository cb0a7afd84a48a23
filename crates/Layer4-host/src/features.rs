//! Built-in features
//!
//! 호스트가 기본으로 설치하는 플러그인과 마이크로 프론트엔드 카탈로그

use alumnet_core::{
    DashboardWidget, FeatureModule, MenuItem, MenuZone, MicroFrontendManifest, Plugin,
    PluginContext, PluginManifest, ProfileSection, Result, SkillTag, StaticModule, WidgetSize,
};
use std::sync::Arc;

// ============================================================================
// Plugins
// ============================================================================

/// 채용 게시판
pub struct JobsFeature;

impl Plugin for JobsFeature {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new("alumnet.jobs", "Jobs")
            .with_description("Job postings shared by alumni")
            .with_author("AlumNet")
            .requires("jobs:read")
    }

    fn initialize(&self, ctx: &PluginContext) -> Result<()> {
        ctx.register_menu_item(
            MenuItem::new("jobs", "Jobs", "/apps/job-board")
                .with_icon("briefcase")
                .with_order(10)
                .requires("jobs:read"),
        )?;
        ctx.register_menu_item(
            MenuItem::new("post-job", "Post a job", "/apps/job-board?new")
                .in_zone(MenuZone::Header)
                .with_order(10)
                .requires("jobs:write"),
        )?;
        ctx.register_widget(
            DashboardWidget::new("latest-jobs", "Latest postings", "JobPostingList")
                .with_size(WidgetSize::Medium, WidgetSize::Medium)
                .with_order(10)
                .requires("jobs:read"),
        )
    }
}

/// 멘토링 매칭
pub struct MentorshipFeature;

impl Plugin for MentorshipFeature {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new("alumnet.mentorship", "Mentorship")
            .with_description("Match students with alumni mentors")
            .with_author("AlumNet")
    }

    fn initialize(&self, ctx: &PluginContext) -> Result<()> {
        ctx.register_menu_item(
            MenuItem::new("find-mentor", "Find a mentor", "/apps/mentorship")
                .with_icon("compass")
                .with_order(20)
                .requires("mentorship:request"),
        )?;
        ctx.register_menu_item(
            MenuItem::new("mentees", "My mentees", "/apps/mentorship")
                .with_icon("users")
                .with_order(20)
                .requires("mentorship:offer"),
        )?;
        ctx.register_profile_section(
            ProfileSection::new("mentor-availability", "Mentoring", "MentorAvailability")
                .with_order(20)
                .requires("mentorship:offer"),
        )?;

        for (id, name) in [("career-advice", "Career advice"), ("interview-prep", "Interview prep")] {
            ctx.register_skill(SkillTag::new(id, name).in_category("mentoring"))?;
        }
        Ok(())
    }
}

/// 동문 이야기
pub struct StoriesFeature;

impl Plugin for StoriesFeature {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new("alumnet.stories", "Stories").with_version("1.2.0")
    }

    fn initialize(&self, ctx: &PluginContext) -> Result<()> {
        ctx.register_menu_item(
            MenuItem::new("stories", "Stories", "/apps/stories")
                .with_order(30)
                .requires("stories:read"),
        )?;
        ctx.register_widget(
            DashboardWidget::new("featured-story", "Featured story", "StoryCard")
                .with_size(WidgetSize::Full, WidgetSize::Small)
                .requires("stories:read"),
        )?;
        ctx.register_menu_item(
            MenuItem::new("about", "About AlumNet", "/about").in_zone(MenuZone::Footer),
        )
    }
}

pub fn plugins() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(JobsFeature),
        Arc::new(MentorshipFeature),
        Arc::new(StoriesFeature),
    ]
}

// ============================================================================
// Micro-frontend catalog
// ============================================================================

/// 기본 카탈로그와 진입점별 모듈
pub fn catalog() -> Vec<(MicroFrontendManifest, Arc<dyn FeatureModule>)> {
    vec![
        (
            MicroFrontendManifest::new("job-board", "Job Board", "jobs/main")
                .with_icon("briefcase")
                .with_team("careers")
                .requires("jobs:read"),
            Arc::new(StaticModule::new("JobBoardApp")),
        ),
        (
            MicroFrontendManifest::new("mentorship", "Mentorship", "mentorship/main")
                .with_team("community"),
            Arc::new(StaticModule::new("MentorshipApp")),
        ),
        (
            MicroFrontendManifest::new("stories", "Stories", "stories/main")
                .with_description("Alumni stories and announcements"),
            Arc::new(StaticModule::new("StoriesApp")),
        ),
        (
            MicroFrontendManifest::new("admin-panel", "Admin Panel", "admin/main")
                .with_team("platform")
                .requires("admin:read")
                .requires("admin:write"),
            Arc::new(StaticModule::new("AdminApp")),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnet_core::{HostBuilder, UserProfile, UserRole};

    fn host() -> alumnet_core::Host {
        let mut builder = HostBuilder::new();
        for plugin in plugins() {
            builder = builder.plugin(plugin);
        }
        for (manifest, module) in catalog() {
            let entry = manifest.entry_point.clone();
            builder = builder.micro_frontend(manifest).module(entry, module);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_builtin_plugins_start_cleanly() {
        let host = host();
        let report = host.start().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.enabled.len(), 3);
    }

    #[test]
    fn test_student_and_mentor_see_different_menus() {
        let host = host();
        host.start().unwrap();

        host.services()
            .session
            .sign_in(UserProfile::new("s1", "Kim", UserRole::Student));
        let student: Vec<String> = host.snapshot().sidebar.into_iter().map(|m| m.id).collect();
        assert_eq!(student, vec!["jobs", "find-mentor", "stories"]);

        host.services()
            .session
            .sign_in(UserProfile::new("m1", "Lee", UserRole::Mentor));
        let mentor = host.snapshot();
        let ids: Vec<&str> = mentor.sidebar.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["jobs", "mentees", "stories"]);
        assert_eq!(mentor.profile_sections.len(), 1);
    }

    #[test]
    fn test_admin_panel_hidden_from_alumni() {
        let host = host();
        host.start().unwrap();
        host.services()
            .session
            .sign_in(UserProfile::new("a1", "Park", UserRole::Alumni));

        let apps: Vec<String> = host.snapshot().apps.into_iter().map(|m| m.id).collect();
        assert!(!apps.contains(&"admin-panel".to_string()));
        assert_eq!(apps.len(), 3);
    }
}
