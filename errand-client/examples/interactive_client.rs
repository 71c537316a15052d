use clap::Parser;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use errand_client::{CreationFlow, CreationState, RoutePlanner, TaskClient, TaskEvent};
use errand_core::{Coordinate, Filter, SortKey};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "errand")]
#[command(about = "Interactive task list with local persistence and remote sync", long_about = None)]
struct Cli {
    /// Database file name (will auto-create in databases/ directory)
    #[arg(short, long, default_value = "tasks")]
    database: String,

    /// Auto-generate a unique database name for concurrent testing
    #[arg(short, long)]
    auto: bool,

    /// Base URL of the todo collection API
    #[arg(short = 's', long, default_value = "http://localhost:8080")]
    api: String,

    /// Base URL of the route lookup service
    #[arg(short, long, default_value = "https://router.project-osrm.org")]
    router: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only show warnings and errors unless asked otherwise
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let cli = Cli::parse();

    std::fs::create_dir_all("databases")?;
    let db_name = if cli.auto {
        let suffix = Uuid::new_v4().to_string()[..8].to_string();
        format!("{}_{}", cli.database, suffix)
    } else {
        cli.database.clone()
    };
    let db_file = format!("databases/{db_name}.sqlite3");
    let db_url = format!("sqlite:{db_file}?mode=rwc");

    println!("{}", "🗒️  Errand Task List".bold().cyan());
    println!("{}", "====================".cyan());
    println!("📁 Database: {}", db_file.green());
    println!("🌐 API: {}", cli.api.blue());
    println!();

    let mut client = TaskClient::new(&db_url, &cli.api).await?;

    let events = client.events();
    events.register_callback(|event| match event {
        TaskEvent::SyncCompleted { count } => {
            println!("🔄 {}", format!("Fetched {count} tasks from the API").green());
        }
        TaskEvent::SyncFailed { message } => {
            println!("⚠️  {}", format!("Sync failed: {message}").yellow());
        }
        _ => {}
    })?;

    println!("⏳ Loading stored tasks and fetching from the API...");
    client.startup().await?;
    events.process_events()?;
    println!();

    let planner = RoutePlanner::new(&cli.router);

    loop {
        let choices = vec![
            "📋 List tasks",
            "➕ Add local task",
            "📤 Create task via API",
            "✅ Toggle task",
            "🗑️  Delete task",
            "🔍 Change filter",
            "↕️  Change sort",
            "📍 Pick location",
            "🗺️  Route preview",
            "❌ Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&choices)
            .default(0)
            .interact()?;

        match selection {
            0 => list_tasks(&client),
            1 => add_local_task(&mut client).await?,
            2 => create_via_api(&mut client).await?,
            3 => toggle_task(&mut client).await?,
            4 => delete_task(&mut client).await?,
            5 => change_filter(&mut client)?,
            6 => change_sort(&mut client)?,
            7 => pick_location(&mut client)?,
            8 => route_preview(&client, &planner).await?,
            9 => {
                if Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Are you sure you want to exit?")
                    .default(false)
                    .interact()?
                {
                    println!("👋 Goodbye!");
                    break;
                }
            }
            _ => unreachable!(),
        }

        events.process_events()?;
        println!();
    }

    Ok(())
}

fn list_tasks(client: &TaskClient) {
    let tasks = client.visible_tasks();
    let store = client.store();
    println!(
        "📋 {} (filter: {}, sort: {})",
        format!("{} task(s)", tasks.len()).bold(),
        store.filter().to_string().blue(),
        store.sort_by().to_string().blue()
    );

    for task in &tasks {
        let mark = if task.completed {
            "✔".green()
        } else {
            "·".normal()
        };
        let mut line = format!("{mark} {}", task.title);
        if let Some(loc) = task.location {
            line.push_str(&format!("  ({:.4}, {:.4})", loc.latitude, loc.longitude));
        }
        println!("  {line}");
    }
}

async fn add_local_task(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let location = client.store().selected_location();
    match client.add_task(&title, &description, location).await? {
        Some(task) => {
            client.select_location(None);
            println!("➕ Added {} (id {})", task.title.green(), task.id.dimmed());
        }
        None => println!("⚠️  {}", "Empty title, nothing added".yellow()),
    }
    Ok(())
}

async fn create_via_api(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;

    let mut flow = CreationFlow::new(client.store().draft_with_selection(&title, &description));

    let state = client
        .submit_creation(&mut flow, &CancellationToken::new())
        .await?;
    match state {
        CreationState::Committed { id } => {
            println!("📤 Created on the API with id {}", id.green());
        }
        CreationState::Failed { message } => {
            println!("⚠️  {}", format!("Submission failed: {message}").yellow());
            println!(
                "   Draft kept: {} (pick the menu item again to retry)",
                flow.draft().title.bold()
            );
        }
        CreationState::Idle => println!("⚠️  {}", "Empty title, nothing submitted".yellow()),
        CreationState::Submitting => {}
    }
    Ok(())
}

fn select_task_id(
    client: &TaskClient,
    prompt: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let tasks = client.visible_tasks();
    if tasks.is_empty() {
        println!("📭 No tasks to pick from");
        return Ok(None);
    }

    let labels: Vec<String> = tasks
        .iter()
        .map(|t| {
            let mark = if t.completed { "✔" } else { " " };
            format!("[{mark}] {}", t.title)
        })
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(tasks[index].id.clone()))
}

async fn toggle_task(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(id) = select_task_id(client, "Toggle which task?")? {
        match client.toggle_task(&id).await? {
            Some(true) => println!("✅ Marked completed"),
            Some(false) => println!("↩️  Marked incomplete"),
            None => println!("⚠️  {}", "Task vanished".yellow()),
        }
    }
    Ok(())
}

async fn delete_task(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(id) = select_task_id(client, "Delete which task?")? {
        if client.remove_task(&id).await? {
            println!("🗑️  Deleted");
        }
    }
    Ok(())
}

fn change_filter(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    let options = [Filter::All, Filter::Completed, Filter::Incomplete];
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Show which tasks?")
        .items(&labels)
        .default(0)
        .interact()?;
    client.set_filter(options[index]);
    Ok(())
}

fn change_sort(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    let options = [SortKey::Date, SortKey::Title];
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Sort by?")
        .items(&labels)
        .default(0)
        .interact()?;
    client.set_sort_by(options[index]);
    Ok(())
}

fn pick_location(client: &mut TaskClient) -> Result<(), Box<dyn std::error::Error>> {
    let latitude: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Latitude")
        .default(41.0082)
        .interact_text()?;
    let longitude: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Longitude")
        .default(28.9784)
        .interact_text()?;

    client.select_location(Some(Coordinate {
        latitude,
        longitude,
    }));
    println!("📍 Location picked, it will attach to the next created task");
    Ok(())
}

async fn route_preview(
    client: &TaskClient,
    planner: &RoutePlanner,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(to) = client.store().selected_location() else {
        println!("⚠️  {}", "Pick a location first".yellow());
        return Ok(());
    };

    let from_lat: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Start latitude")
        .default(41.0422)
        .interact_text()?;
    let from_lon: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Start longitude")
        .default(29.0067)
        .interact_text()?;

    let path = planner
        .route(
            Coordinate {
                latitude: from_lat,
                longitude: from_lon,
            },
            to,
        )
        .await;

    if path.is_empty() {
        println!("🗺️  No route available");
    } else {
        println!("🗺️  Route with {} points", path.len().to_string().green());
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            println!(
                "   {:.4},{:.4} → {:.4},{:.4}",
                first.latitude, first.longitude, last.latitude, last.longitude
            );
        }
    }
    Ok(())
}
