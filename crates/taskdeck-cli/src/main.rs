//! Command-line frontend for Taskdeck.
//!
//! One subcommand per user action; all state and sync behavior lives in
//! taskdeck-core. The only failure this frontend surfaces for the sync
//! paths is the offline-mode notice after login or signup.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use taskdeck_core::api::ApiClient;
use taskdeck_core::session::{LoginOutcome, SessionManager, SignupOutcome};
use taskdeck_core::todos::{filter_todos, StatusFilter, TodoSync};
use taskdeck_core::{paths, settings};

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Offline-first personal task tracker")]
struct Cli {
    /// Base address of the todo service.
    #[arg(long, env = "TASKDECK_SERVER", default_value = "http://localhost:5000")]
    server: String,

    /// Directory holding persisted state (defaults under the home dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Sign in and store the session.
    Login { email: String, password: String },
    /// Sign out, discarding the stored session and todo list.
    Logout,
    /// Show the stored session identity.
    Whoami,
    /// Fetch the account record from the service.
    Profile,
    /// List todos.
    List {
        /// all, active, or completed.
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Only show titles containing this text.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a todo.
    Add { title: String },
    /// Toggle completion on a todo.
    Toggle { id: String },
    /// Change a todo's title.
    Edit { id: String, title: String },
    /// Remove a todo.
    Rm { id: String },
    /// Toggle dark mode.
    Theme,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.or_else(paths::default_data_dir) {
        Some(dir) => dir,
        None => {
            eprintln!("error: cannot determine a data directory; pass --data-dir");
            return ExitCode::FAILURE;
        }
    };

    log::debug!("server {} data dir {}", cli.server, data_dir.display());
    let client = ApiClient::new(cli.server);

    match run(cli.command, &data_dir, client) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, data_dir: &Path, client: ApiClient) -> Result<(), Box<dyn Error>> {
    let mut sessions = SessionManager::new(data_dir.to_path_buf(), client.clone());
    sessions.restore()?;

    match command {
        Command::Signup {
            name,
            email,
            password,
        } => match sessions.signup(&name, &email, &password)? {
            SignupOutcome::Registered => {
                println!("Account created. Sign in with `taskdeck login`.");
            }
            SignupOutcome::Offline => {
                println!("Service unavailable. Account created in offline mode.");
            }
        },

        Command::Login { email, password } => match sessions.login(&email, &password)? {
            LoginOutcome::Online => println!("Signed in as {email}."),
            LoginOutcome::Offline => println!("Service unavailable. Using offline mode."),
        },

        Command::Logout => {
            sessions.logout()?;
            println!("Signed out.");
        }

        Command::Whoami => {
            let session = sessions.session();
            match (&session.token, &session.user) {
                (Some(_), Some(user)) => {
                    println!("{} <{}>", user.name, user.email);
                    if session.is_offline() {
                        println!("(offline session)");
                    }
                }
                (Some(_), None) => println!("Signed in (no stored account record)."),
                _ => println!("Not signed in."),
            }
        }

        Command::Profile => {
            let token = require_token(&sessions)?;
            let user = client.profile(&token)?;
            println!("{} <{}>", user.name, user.email);
        }

        Command::List { status, search } => {
            let mut engine = open_todos(&sessions, data_dir, &client)?;
            engine.load()?;

            let items = filter_todos(engine.todos(), status, &search);
            if items.is_empty() {
                println!("No tasks.");
            }
            for todo in items {
                let mark = if todo.completed { "x" } else { " " };
                match todo.created_at {
                    Some(created) => {
                        println!("[{mark}] {}  {}  ({})", todo.id, todo.title, created.format("%b %e"))
                    }
                    None => println!("[{mark}] {}  {}", todo.id, todo.title),
                }
            }
        }

        Command::Add { title } => {
            let mut engine = open_todos(&sessions, data_dir, &client)?;
            engine.load()?;
            engine.add(&title)?;
            println!("Added.");
        }

        Command::Toggle { id } => {
            let mut engine = open_todos(&sessions, data_dir, &client)?;
            engine.load()?;
            engine.toggle(&id)?;
            println!("Toggled {id}.");
        }

        Command::Edit { id, title } => {
            let mut engine = open_todos(&sessions, data_dir, &client)?;
            engine.load()?;
            engine.edit(&id, &title)?;
            println!("Updated {id}.");
        }

        Command::Rm { id } => {
            let mut engine = open_todos(&sessions, data_dir, &client)?;
            engine.load()?;
            engine.delete(&id)?;
            println!("Removed {id}.");
        }

        Command::Theme => {
            let mut current = settings::load_settings(data_dir)?;
            current.dark_mode = !current.dark_mode;
            settings::save_settings(data_dir, &current)?;
            println!(
                "Dark mode {}.",
                if current.dark_mode { "on" } else { "off" }
            );
        }
    }

    Ok(())
}

fn require_token(sessions: &SessionManager) -> Result<String, Box<dyn Error>> {
    sessions
        .session()
        .token
        .clone()
        .ok_or_else(|| "not signed in; run `taskdeck login` first".into())
}

fn open_todos(
    sessions: &SessionManager,
    data_dir: &Path,
    client: &ApiClient,
) -> Result<TodoSync, Box<dyn Error>> {
    let token = require_token(sessions)?;
    Ok(TodoSync::new(data_dir.to_path_buf(), client.clone(), token))
}
