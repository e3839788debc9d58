use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studypath_client::api::{HttpPlatformApi, PlatformApi};
use studypath_client::forms::{LoginForm, SignupForm, TaskForm};
use studypath_client::models::{User, UserRole};
use studypath_client::reconcile::parse_due_date;
use studypath_client::session::{FileSessionStore, RouteGuard, SessionManager};
use studypath_client::views::teacher::{ManageTasksView, SubmissionReviewView};
use studypath_client::views::{
    calendar, dashboard, history::HistoryView, task_detail::TaskDetailView, tasks, TaskBoard,
    TracingNotifier,
};
use studypath_client::ClientConfig;

const USAGE: &str = "usage: studypath <command>
  login <email> <password>
  signup <name> <email> <password> <student|teacher>
  logout
  whoami
  tasks
  dashboard
  history
  calendar <YYYY-MM-DD>
  submit <task-id> <file-path>
  new-task <title> <description> <due-date>
  delete-task <task-id>
  grade <submission-id> <grade> [feedback]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "studypath=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = ClientConfig::new_from_env();

    let api: Arc<dyn PlatformApi> = Arc::new(HttpPlatformApi::new(config.api_base_url.clone())?);
    let store = Arc::new(FileSessionStore::open(&config.session_file)?);
    let session = SessionManager::new(api.clone(), store);
    // Restore before anything protected runs.
    session.restore();

    let notifier = Arc::new(TracingNotifier);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("login") if args.len() == 3 => {
            let form = LoginForm {
                email: args[1].clone(),
                password: args[2].clone(),
            };
            if let Err(errors) = form.validate() {
                print_field_errors(&errors);
                return Ok(());
            }
            if session.login(&form.email, &form.password).await {
                println!("Signed in as {}", form.email);
            } else {
                println!("Login failed. Check your credentials and try again.");
            }
        }
        Some("signup") if args.len() == 5 => {
            let Some(role) = UserRole::parse(&args[4]) else {
                println!("Role must be 'student' or 'teacher'");
                return Ok(());
            };
            let form = SignupForm {
                name: args[1].clone(),
                email: args[2].clone(),
                password: args[3].clone(),
                role,
                profile_image: None,
            };
            if let Err(errors) = form.validate() {
                print_field_errors(&errors);
                return Ok(());
            }
            if session
                .signup(&form.name, &form.email, &form.password, form.role, None)
                .await
            {
                println!("Account created. Run `studypath login` to sign in.");
            } else {
                println!("Signup failed.");
            }
        }
        Some("logout") => {
            session.logout();
            println!("Signed out.");
        }
        Some("whoami") => match session.guard() {
            RouteGuard::SignedIn(user) => {
                println!("{} <{}> ({})", user.name, user.email, user.role.as_str());
            }
            _ => println!("Not signed in."),
        },
        Some("tasks") => {
            let viewer = current_user(&session);
            let board = TaskBoard::new(api.clone(), notifier.clone());
            board.refresh(viewer.as_ref()).await;
            let listing = tasks::listing(&board.snapshot().await);
            println!("Upcoming:");
            for task in &listing.buckets.upcoming {
                println!("  {}  {} (due {})", task.task.id, task.task.title, task.task.due_date);
            }
            println!("Locked:");
            for task in &listing.buckets.locked {
                println!("  {}  {}", task.task.id, task.task.title);
            }
            println!("Completed:");
            for task in &listing.buckets.completed {
                println!("  {}  {}", task.task.id, task.task.title);
            }
        }
        Some("dashboard") => {
            let Some(viewer) = require_login(&session) else {
                return Ok(());
            };
            let board = TaskBoard::new(api.clone(), notifier.clone());
            board.refresh(Some(&viewer)).await;
            let summary = dashboard::summarize(&board.snapshot().await);
            println!("Hi, {}!", viewer.name);
            println!(
                "Completed {} of {} tasks, {} awaiting review",
                summary.completed, summary.total, summary.in_progress
            );
            match &summary.next_deadline {
                Some(preview) => println!(
                    "Next deadline: {} due in {} days ({})",
                    preview.title, preview.days_until, preview.due_date
                ),
                None => println!("No upcoming deadlines"),
            }
        }
        Some("history") => {
            let Some(viewer) = require_login(&session) else {
                return Ok(());
            };
            let view = HistoryView::new(api.clone(), notifier.clone());
            view.refresh(Some(&viewer)).await;
            for submission in &view.snapshot().await.submissions {
                println!(
                    "{}  {}  {}  {:?}  grade={}",
                    submission.id,
                    submission.task_title,
                    submission.file_name,
                    submission.status,
                    submission.grade.as_deref().unwrap_or("-")
                );
            }
        }
        Some("calendar") if args.len() == 2 => {
            let Some(day) = parse_due_date(&args[1]) else {
                println!("Date must be YYYY-MM-DD");
                return Ok(());
            };
            let board = TaskBoard::new(api.clone(), notifier.clone());
            board.refresh(None).await;
            let state = board.snapshot().await;
            let due = calendar::tasks_due_on(&state.tasks, day);
            if due.is_empty() {
                println!("No tasks scheduled for {}", day);
            } else {
                for task in due {
                    println!("{}  {}", task.id, task.title);
                }
            }
        }
        Some("submit") if args.len() == 3 => {
            let Some(viewer) = require_login(&session) else {
                return Ok(());
            };
            let path = std::path::Path::new(&args[2]);
            let bytes = std::fs::read(path)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let view = TaskDetailView::new(api.clone(), notifier.clone());
            view.refresh(&args[1], Some(&viewer)).await;
            if view.submit_file(&viewer, &file_name, bytes).await {
                println!("Submitted {} for task {}", file_name, args[1]);
            } else {
                println!("Submission failed.");
            }
        }
        Some("new-task") if args.len() == 4 => {
            let Some(_viewer) = require_teacher(&session) else {
                return Ok(());
            };
            let form = TaskForm {
                title: args[1].clone(),
                description: args[2].clone(),
                due_date: args[3].clone(),
                ..TaskForm::default()
            };
            let view = ManageTasksView::new(api.clone(), notifier.clone());
            match view.create_task(&form).await {
                Some(task) => println!("Created task {}", task.id),
                None => println!("Task creation failed."),
            }
        }
        Some("delete-task") if args.len() == 2 => {
            let Some(_viewer) = require_teacher(&session) else {
                return Ok(());
            };
            let view = ManageTasksView::new(api.clone(), notifier.clone());
            if view.delete_task(&args[1]).await {
                println!("Deleted task {}", args[1]);
            }
        }
        Some("grade") if args.len() >= 3 => {
            let Some(_viewer) = require_teacher(&session) else {
                return Ok(());
            };
            let feedback = args.get(3).cloned().unwrap_or_default();
            let view = SubmissionReviewView::new(api.clone(), notifier.clone());
            if view.grade(&args[1], &args[2], &feedback).await {
                println!("Graded submission {}", args[1]);
            }
        }
        _ => println!("{}", USAGE),
    }

    Ok(())
}

fn current_user(session: &SessionManager) -> Option<User> {
    match session.guard() {
        RouteGuard::SignedIn(user) => Some(user),
        _ => None,
    }
}

fn require_login(session: &SessionManager) -> Option<User> {
    let user = current_user(session);
    if user.is_none() {
        println!("Not signed in. Run `studypath login` first.");
    }
    user
}

fn require_teacher(session: &SessionManager) -> Option<User> {
    let user = require_login(session)?;
    if !user.is_teacher() {
        println!("This command requires a teacher account.");
        return None;
    }
    Some(user)
}

fn print_field_errors(errors: &[studypath_client::forms::FieldError]) {
    for error in errors {
        println!("{}: {}", error.field, error.message);
    }
}
