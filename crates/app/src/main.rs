use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "homeledger={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let db = match parse_database(&settings.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };

    let mut ledger = ledger::Ledger::builder().database(db).build().await?;

    let owner = settings.app.owner.as_str();
    if let Err(err) = ledger.load_accounts(owner).await {
        tracing::error!("failed to load accounts for {owner}: {err}");
        return Err(err.into());
    }

    for account in ledger.accounts(owner) {
        tracing::info!(
            "{} ({}): {}",
            account.name,
            account.kind.as_str(),
            account.balance
        );
    }
    tracing::info!("total balance: {}", ledger.total_balance(owner));
    tracing::info!("credit debt: {}", ledger.total_credit_debt(owner));
    tracing::info!("net worth: {}", ledger.net_worth(owner));

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        settings::Database::Memory => String::from("sqlite::memory:"),
        settings::Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
