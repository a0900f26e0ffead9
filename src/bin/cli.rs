use clap::{Parser, Subcommand};
use labkeeper::app::{PgAppServices, connect_pool, run_migrations};
use labkeeper::config::AppConfig;
use labkeeper::domain::{ComputerCode, ComputerStatus, Email, Password, Role};
use labkeeper::repository::ComputerFilter;
use labkeeper::services::auth_service::CreateUserRequest;
use labkeeper::services::computer_service::CreateComputerRequest;

#[derive(Parser)]
#[clap(name = "labkeeper CLI", about = "Administrative tasks for the lab inventory")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a login account
    CreateUser {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long, default_value = "student")]
        role: Role,
    },
    /// Register a lab computer
    AddComputer {
        #[clap(long)]
        code: String,
        #[clap(long)]
        description: String,
    },
    /// Print the inventory
    ListComputers {
        #[clap(long)]
        status: Option<ComputerStatus>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let pool = connect_pool(&config.database).await?;
    let services = PgAppServices::from_pool(&pool, &config);

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("Migrations applied");
        }
        Commands::CreateUser {
            email,
            password,
            role,
        } => {
            let req = CreateUserRequest {
                email: Email::try_from(email.as_str())?,
                password: Password::try_from(password.as_str())?,
                role,
            };
            match services.auth.create_user(req).await {
                Ok(u) => println!("Created user {} <{}> with role {}", u.id, u.email, u.role),
                Err(e) => eprintln!("Error creating user: {}", e),
            }
        }
        Commands::AddComputer { code, description } => {
            let req = CreateComputerRequest {
                code: ComputerCode::try_from(code.as_str())?,
                description,
            };
            match services.computers.create_computer(req).await {
                Ok(c) => println!("Added computer {} ({}) as {}", c.id, c.code, c.status),
                Err(e) => eprintln!("Error adding computer: {}", e),
            }
        }
        Commands::ListComputers { status } => {
            let computers = services
                .computers
                .list_computers(ComputerFilter { status })
                .await?;
            for c in computers {
                println!("{:>5}  {:<12} {:<12} {}", c.id, c.code, c.status, c.description);
            }
        }
    }

    Ok(())
}
