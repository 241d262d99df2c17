//! Command handlers: drive the core and render its output.

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use log::{debug, info};
use skillpath_core::{
    generator::{COMMIT_FAILURE, GENERATION_FAILURE},
    models::User,
    wizard::today,
    Client, ClientError, CreateResult, DateEdit, DeleteResult, Id, MediaFile, OperationStatus,
    PlanDetail, PlanEditor, Posts, Suggestions, TaskGenerator, TaskPosition, ToggleFollow, Users,
    Wizard,
};

use crate::{
    cli::{
        split_task, AiCommands, CourseCommands, CreatePlanArgs, CreatePostArgs, EditPlanArgs,
        GenerateArgs, LoginArgs, PlanCommands, PostCommands, SavedCommands, UserCommands,
        UserRefArgs,
    },
    renderer::TerminalRenderer,
};

/// An error whose text is already meant for the user and is printed as is.
#[derive(Debug)]
pub struct Reported(pub String);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Reported {}

pub struct Cli {
    client: Client,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(client: Client, renderer: TerminalRenderer) -> Self {
        Self { client, renderer }
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        let user = User::from(args);
        self.client.store().login(&user).await?;
        info!("Session started for {}", user.id);
        self.renderer.show(&OperationStatus::success(format!(
            "Logged in as {}",
            user.display_name()
        )))
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.store().logout().await?;
        self.renderer
            .show(&OperationStatus::success("Logged out. Local state cleared."))
    }

    pub async fn whoami(&self) -> Result<()> {
        match self.client.store().current_user().await? {
            Some(user) => self.renderer.show(&user),
            None => self.renderer.render("Not logged in.\n"),
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(&args.into()).await,
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::Edit(args) => self.edit_plan(args).await,
            PlanCommands::Check(args) => self.check_task(args.into()).await,
            PlanCommands::Delete(args) => self.delete_plan(&args.into()).await,
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self.client.list_plans_summary().await?;
        self.renderer.show(&summaries)
    }

    async fn show_plan(&self, id: &Id) -> Result<()> {
        let detail = PlanDetail::load(&self.client, id).await?;
        self.renderer.show(detail.plan())
    }

    /// Walks the wizard with the values given on the command line, so the
    /// same guards apply as in the interactive form.
    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let today = today();
        let mut wizard = Wizard::new();

        wizard.set_title(args.title);
        wizard.set_background(args.background);
        wizard.set_scope(args.scope);
        wizard.advance().map_err(ClientError::from)?;

        for skill in &args.skills {
            wizard.add_skill(skill);
        }
        for topic in &args.topics {
            wizard.add_topic(topic);
        }
        wizard.advance().map_err(ClientError::from)?;

        if let Some(start) = args.start {
            self.report_date_edit(wizard.set_start_date(start, today));
        }
        if let Some(end) = args.end {
            self.report_date_edit(wizard.set_end_date(end, today));
        }
        wizard.advance().map_err(ClientError::from)?;

        for raw in &args.tasks {
            let (name, description) = split_task(raw);
            wizard.add_task(name, description);
        }
        for course in &args.courses {
            wizard.add_course(course);
        }

        if args.stage {
            wizard.stage_for_ai(self.client.store()).await?;
            return self.renderer.show(&OperationStatus::success(
                "Draft staged. Run `skillpath ai generate` to add AI-generated tasks.",
            ));
        }

        let plan = wizard.submit(&self.client).await?;
        self.renderer.show(&CreateResult::new(plan))
    }

    fn report_date_edit(&self, edit: DateEdit) {
        if let DateEdit::Repaired { value, alert } = edit {
            self.renderer.alert(&format!("{alert} (using {value})"));
        }
    }

    async fn edit_plan(&self, args: EditPlanArgs) -> Result<()> {
        let (id, edits) = args.into_edits();
        let mut editor = PlanEditor::open(&self.client, &id).await?;

        for edit in edits {
            debug!("Applying {edit:?}");
            editor.apply(edit)?;
        }
        if !editor.is_dirty() {
            return self
                .renderer
                .show(&OperationStatus::failure("No changes given; nothing to save."));
        }

        let result = editor.save(&self.client).await?;
        self.renderer.show(&result)
    }

    async fn check_task(&self, position: TaskPosition) -> Result<()> {
        let mut detail = PlanDetail::load(&self.client, &Id { id: position.plan_id }).await?;
        let completed = detail.toggle_task(&self.client, position.index).await?;

        let task = &detail.plan().tasks[position.index];
        let state = if completed { "completed" } else { "not completed" };
        self.renderer.show(&OperationStatus::success(format!(
            "'{}' marked {state}. Progress: {}",
            task.task_name,
            detail.progress()
        )))
    }

    async fn delete_plan(&self, id: &Id) -> Result<()> {
        let plan = self.client.get_plan(id).await?;
        self.client.delete_plan(id).await?;
        self.renderer.show(&DeleteResult::new(plan))
    }

    pub async fn handle_ai_command(&self, command: AiCommands) -> Result<()> {
        match command {
            AiCommands::Generate(args) => self.generate_tasks(args).await,
        }
    }

    async fn generate_tasks(&self, args: GenerateArgs) -> Result<()> {
        let today = today();
        let mut generator = TaskGenerator::resume(self.client.store()).await?;
        generator.apply(&(&args).into());

        if let Err(e) = generator.generate(self.client.backend(), today).await {
            return Err(Reported(e.user_message_or(GENERATION_FAILURE)).into());
        }
        if let Some(notice) = generator.notice() {
            return self.renderer.show(&OperationStatus::failure(notice));
        }

        for name in &args.select {
            generator.toggle_by_name(name)?;
        }
        self.renderer.show(&Suggestions {
            tasks: generator.suggestions(),
            selected: generator.selected(),
        })?;

        if !args.commit {
            return Ok(());
        }
        match generator.commit(&self.client, today).await {
            Ok(plan) => self.renderer.show(&CreateResult::new(plan)),
            Err(e) if e.is_validation() || matches!(e, ClientError::NotLoggedIn) => Err(e.into()),
            Err(e) => {
                debug!("Commit failed: {e}");
                Err(Reported(COMMIT_FAILURE.to_string()).into())
            }
        }
    }

    pub async fn handle_course_command(&self, command: CourseCommands) -> Result<()> {
        match command {
            CourseCommands::List => {
                let courses = self.client.list_courses_display().await?;
                self.renderer.show(&courses)
            }
        }
    }

    pub async fn handle_saved_command(&self, command: SavedCommands) -> Result<()> {
        let saved = self.client.saved_posts();
        match command {
            SavedCommands::Toggle(args) => {
                let outcome = saved.toggle(&args.post_id).await?;
                let verb = if outcome.saved { "Saved" } else { "Removed" };
                self.renderer.show(&OperationStatus::success(format!(
                    "{verb} post {}. {} saved posts.",
                    args.post_id, outcome.count
                )))
            }
            SavedCommands::List => self.renderer.show(&Posts(saved.list().await?)),
            SavedCommands::Count => {
                let count = saved.count().await?;
                self.renderer.render(&format!("{count} saved posts\n"))
            }
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::Search(args) => {
                // A single query from the shell has nothing to debounce.
                let search = self
                    .client
                    .user_search()
                    .await?
                    .with_delay(Duration::ZERO);
                let users = search
                    .search(&args.query)
                    .await
                    .context("User search failed")?
                    .unwrap_or_default();
                self.renderer.show(&Users(users))
            }
            UserCommands::Follow(args) => {
                let params = ToggleFollow::from(args);
                let outcome = self.client.network().toggle_follow(&params).await?;
                let message = if outcome.following {
                    format!("You are now following {}", params.target_id)
                } else {
                    format!("You unfollowed {}", params.target_id)
                };
                self.renderer.show(&OperationStatus::success(message))?;
                match outcome.stats {
                    Some(stats) => self.renderer.show(&stats),
                    None => Ok(()),
                }
            }
            UserCommands::Stats(args) => {
                let user_id = self.resolve_user(args).await?;
                let stats = self.client.network().stats(&user_id).await?;
                self.renderer.show(&stats)
            }
            UserCommands::Followers(args) => {
                let user_id = self.resolve_user(args).await?;
                let users = self.client.network().followers(&user_id).await?;
                self.renderer.show(&Users(users))
            }
            UserCommands::Following(args) => {
                let user_id = self.resolve_user(args).await?;
                let users = self.client.network().following(&user_id).await?;
                self.renderer.show(&Users(users))
            }
        }
    }

    async fn resolve_user(&self, args: UserRefArgs) -> Result<String> {
        match args.user_id {
            Some(id) => Ok(id),
            None => Ok(self.client.require_user().await?.id),
        }
    }

    pub async fn handle_post_command(&self, command: PostCommands) -> Result<()> {
        let feed = self.client.feed();
        match command {
            PostCommands::Create(args) => self.create_post(args).await,
            PostCommands::List(args) => {
                let posts = feed.list(args.user.as_deref()).await?;
                self.renderer.show(&Posts(posts))
            }
            PostCommands::Edit(args) => {
                feed.edit(&args.post_id, &args.description).await?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Post {} updated successfully!",
                    args.post_id
                )))
            }
            PostCommands::Delete(args) => {
                feed.delete(&args.post_id).await?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Post {} deleted.",
                    args.post_id
                )))
            }
        }
    }

    async fn create_post(&self, args: CreatePostArgs) -> Result<()> {
        let mut media = Vec::with_capacity(args.media.len());
        for path in &args.media {
            media.push(MediaFile::read(path).await?);
        }
        self.client.feed().create(&args.description, media).await?;
        self.renderer
            .show(&OperationStatus::success("Post created successfully!"))
    }
}
