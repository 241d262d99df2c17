use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AiCommands, CourseCommands, LoginArgs, PlanCommands, PostCommands, SavedCommands,
    UserCommands,
};

/// Command-line client for the skillpath learning platform
///
/// Create learning plans through the guided wizard, generate tasks with the
/// platform's AI assistant, check tasks off, publish posts, and manage
/// saved posts and follows. Requests go to the platform's REST API; the session and the
/// draft staged for AI generation are kept in a local store.
#[derive(Parser)]
#[command(version, about, name = "skillpath")]
pub struct Args {
    /// Base URL of the REST API. Defaults to $SKILLPATH_API_URL or
    /// http://localhost:8070/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the local store file. Defaults to
    /// $XDG_DATA_HOME/skillpath/store.db
    #[arg(long, global = true)]
    pub store_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the skillpath CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Store the user record that identifies this session
    Login(LoginArgs),
    /// End the session and clear local state
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage learning plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Generate tasks with the AI assistant
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },
    /// Browse the course catalogue
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Publish and manage your posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage saved posts
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Find and follow other users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}
