use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bankportal::config::{ConfigError, PortalConfig};
use bankportal::net::storage::FileStorage;
use bankportal::net::types::{
    AccountCreationRequest, AccountType, LoginRequest, ProfileUpdateRequest, RegisterRequest, Role, Transaction,
    TransferRequest, UserPatch,
};
use bankportal::net::{ApiClient, ApiError, DEFAULT_PAGE_SIZE};
use bankportal::state::admin::load_overview;
use bankportal::state::auth::{SessionError, SessionStore};
use bankportal::state::dashboard::{DashboardView, MonthKey};
use bankportal::state::route::RouteState;
use bankportal::state::toast::{ToastKind, Toasts};
use bankportal::state::transactions::{
    SortKey, SortOrder, TRANSACTIONS_PER_PAGE, TransactionFilter, TypeFilter, paginate,
};
use bankportal::util::auth::{DASHBOARD_PATH, enforce};
use bankportal::util::format::{format_date, format_eur, format_iban, format_signed_amount, format_timestamp};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("not signed in; run `bankportal login` first")]
    NotSignedIn,
    #[error("this command requires an administrator account")]
    NotAdmin,
    #[error("could not load {0}")]
    LoadFailed(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Session(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bankportal", about = "Banking portal terminal client")]
struct Cli {
    #[arg(long, env = "BANKPORTAL_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "BANKPORTAL_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session.
    Login {
        username: String,
        #[arg(long, env = "BANKPORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it.
    Register {
        username: String,
        #[arg(long, env = "BANKPORTAL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Drop the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Exchange the session token for a fresh one.
    Refresh,
    Accounts(AccountsCommand),
    Transactions(TransactionsCommand),
    Transfers(TransfersCommand),
    Admin(AdminCommand),
    Profile(ProfileCommand),
    /// Balances, monthly flow and recent activity.
    Dashboard,
}

#[derive(Args, Debug)]
struct AccountsCommand {
    #[command(subcommand)]
    command: AccountsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AccountsSubcommand {
    List,
    Get { account_id: i64 },
    Iban { iban: String },
    Balance { account_id: i64 },
}

#[derive(Args, Debug)]
struct TransactionsCommand {
    #[command(subcommand)]
    command: TransactionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TransactionsSubcommand {
    /// One backend page of an account's history (zero-based).
    Account {
        account_id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// An account's history between two days, inclusive.
    Range {
        account_id: i64,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Every transaction of the signed-in user, filtered locally.
    Mine(HistoryArgs),
    Get {
        transaction_id: i64,
    },
    Reference {
        reference: String,
    },
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[arg(long, value_enum, default_value_t = KindArg::All)]
    kind: KindArg,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long)]
    min: Option<Decimal>,
    #[arg(long)]
    max: Option<Decimal>,
    #[arg(long, value_enum, default_value_t = SortArg::Date)]
    sort: SortArg,
    #[arg(long, default_value_t = false)]
    asc: bool,
    /// 1-based page.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    All,
    Credit,
    Debit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Date,
    Amount,
}

#[derive(Args, Debug)]
struct TransfersCommand {
    #[command(subcommand)]
    command: TransfersSubcommand,
}

#[derive(Subcommand, Debug)]
enum TransfersSubcommand {
    Execute {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        beneficiary: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    Get {
        transfer_id: i64,
    },
    Reference {
        reference: String,
    },
    Cancel {
        transfer_id: i64,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    /// Bank-wide totals and activity.
    Overview,
    Accounts,
    CreateAccount {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        account_type: AccountTypeArg,
        #[arg(long)]
        initial_balance: Option<Decimal>,
    },
    Transactions,
    Reverse {
        transaction_id: i64,
        #[arg(long)]
        reason: String,
    },
    Transfers,
    Pending,
    Users,
    User {
        user_id: i64,
    },
    UpdateUser {
        user_id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    DeleteUser {
        user_id: i64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AccountTypeArg {
    Checking,
    Savings,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Client,
    Admin,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
}

struct CliContext {
    config: PortalConfig,
    client: ApiClient,
    session: SessionStore,
    route: Arc<RouteState>,
    toasts: Toasts,
}

impl CliContext {
    fn require_session(&self, requires_admin: bool) -> Result<(), CliError> {
        let state = self.session.state();
        if enforce(&state, self.route.as_ref(), &self.config.login_path, requires_admin) {
            return Err(if self.route.is_at(&self.config.login_path) { CliError::NotSignedIn } else { CliError::NotAdmin });
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut ctx = match build_context(cli.base_url.as_deref(), cli.session_file) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let result = run(&mut ctx, cli.command).await;
    flush_toasts(&mut ctx.toasts);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e.user_message());
            if ctx.route.is_at(&ctx.config.login_path) && !ctx.session.is_authenticated() {
                eprintln!("hint: run `bankportal login <username>` to start a new session");
            }
            ExitCode::FAILURE
        }
    }
}

fn build_context(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<CliContext, CliError> {
    let mut config = PortalConfig::from_env()?;
    if let Some(raw) = base_url {
        config = config.with_base_url(raw)?;
    }
    if let Some(path) = session_file {
        config.session_file = path;
    }

    let storage = Arc::new(FileStorage::new(config.session_file.clone()));
    let route = Arc::new(RouteState::new(DASHBOARD_PATH));
    let client = ApiClient::new(&config, storage.clone(), route.clone())?;
    let mut session = SessionStore::new(storage, Arc::new(client.clone()));
    session.init();
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "client ready");

    Ok(CliContext { config, client, session, route, toasts: Toasts::default() })
}

async fn run(ctx: &mut CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            ctx.session.login(&LoginRequest { username, password }).await?;
            print_whoami(ctx)
        }
        Command::Register { username, password, email, first_name, last_name } => {
            let message = ctx
                .session
                .register(&RegisterRequest { username, password, email, first_name, last_name })
                .await?;
            ctx.toasts.success(message);
            print_whoami(ctx)
        }
        Command::Logout => {
            ctx.session.logout();
            ctx.toasts.success("Signed out");
            Ok(())
        }
        Command::Whoami => {
            ctx.require_session(false)?;
            print_whoami(ctx)
        }
        Command::Refresh => {
            ctx.require_session(false)?;
            ctx.session.refresh().await?;
            ctx.toasts.success("Session refreshed");
            Ok(())
        }
        Command::Accounts(accounts) => {
            ctx.require_session(false)?;
            run_accounts(ctx, accounts).await
        }
        Command::Transactions(transactions) => {
            ctx.require_session(false)?;
            run_transactions(ctx, transactions).await
        }
        Command::Transfers(transfers) => {
            ctx.require_session(false)?;
            run_transfers(ctx, transfers).await
        }
        Command::Admin(admin) => {
            ctx.require_session(true)?;
            run_admin(ctx, admin).await
        }
        Command::Profile(profile) => {
            ctx.require_session(false)?;
            run_profile(ctx, profile).await
        }
        Command::Dashboard => {
            ctx.require_session(false)?;
            run_dashboard(ctx).await
        }
    }
}

fn print_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let user = ctx.session.user().ok_or(CliError::NotSignedIn)?;
    print_json(&json!({
        "id": user.id,
        "username": user.username,
        "name": user.display_name(),
        "email": user.email,
        "role": user.role,
    }))
}

async fn run_accounts(ctx: &CliContext, accounts: AccountsCommand) -> Result<(), CliError> {
    let api = ctx.client.accounts();
    match accounts.command {
        AccountsSubcommand::List => {
            let rows: Vec<Value> = api
                .list()
                .await?
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id,
                        "name": a.account_name,
                        "type": a.account_type.as_str(),
                        "iban": format_iban(&a.iban),
                        "balance": format_eur(a.balance),
                        "opened": format_date(a.created_at),
                    })
                })
                .collect();
            print_json(&rows)
        }
        AccountsSubcommand::Get { account_id } => print_json(&api.get(account_id).await?),
        AccountsSubcommand::Iban { iban } => print_json(&api.by_iban(&iban).await?),
        AccountsSubcommand::Balance { account_id } => {
            print_json(&json!({ "accountId": account_id, "balance": format_eur(api.balance(account_id).await?) }))
        }
    }
}

async fn run_transactions(ctx: &CliContext, transactions: TransactionsCommand) -> Result<(), CliError> {
    let api = ctx.client.transactions();
    match transactions.command {
        TransactionsSubcommand::Account { account_id, page, size } => {
            print_json(&api.by_account(account_id, page, size).await?)
        }
        TransactionsSubcommand::Range { account_id, from, to } => {
            let start = from.and_hms_opt(0, 0, 0).unwrap_or_default();
            let end = to.and_hms_opt(23, 59, 59).unwrap_or_default();
            print_json(&api.by_account_in_range(account_id, start, end).await?)
        }
        TransactionsSubcommand::Mine(args) => {
            let all = api.for_user().await?;
            let filter = TransactionFilter {
                kind: match args.kind {
                    KindArg::All => TypeFilter::All,
                    KindArg::Credit => TypeFilter::Credit,
                    KindArg::Debit => TypeFilter::Debit,
                },
                search: args.search,
                from: args.from,
                to: args.to,
                min_amount: args.min,
                max_amount: args.max,
                sort_by: match args.sort {
                    SortArg::Date => SortKey::Date,
                    SortArg::Amount => SortKey::Amount,
                },
                order: if args.asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            let matching = filter.apply(&all);
            let page = paginate(&matching, args.page, TRANSACTIONS_PER_PAGE);
            print_json(&json!({
                "page": page.page,
                "totalPages": page.total_pages,
                "showing": format!("{}-{} of {} ({} total)", page.first_row, page.last_row, page.total_items, all.len()),
                "items": page.items.iter().map(history_row).collect::<Vec<_>>(),
            }))
        }
        TransactionsSubcommand::Get { transaction_id } => print_json(&api.get(transaction_id).await?),
        TransactionsSubcommand::Reference { reference } => print_json(&api.by_reference(&reference).await?),
    }
}

fn history_row(tx: &Transaction) -> Value {
    json!({
        "date": format_timestamp(tx.transaction_date),
        "amount": format_signed_amount(tx.amount, tx.transaction_type),
        "description": tx.description,
        "reference": tx.reference_number,
        "balanceAfter": format_eur(tx.balance_after),
    })
}

async fn run_transfers(ctx: &mut CliContext, transfers: TransfersCommand) -> Result<(), CliError> {
    let api = ctx.client.transfers();
    match transfers.command {
        TransfersSubcommand::Execute { from, to, amount, beneficiary, description } => {
            let request =
                TransferRequest { from_iban: from, to_iban: to, amount, beneficiary_name: beneficiary, description };
            let transfer = api.execute(&request).await?;
            ctx.toasts
                .success(format!("Transfer {} submitted ({:?})", transfer.reference_number, transfer.status));
            print_json(&transfer)
        }
        TransfersSubcommand::List { page, size } => print_json(&api.for_user(page, size).await?),
        TransfersSubcommand::Get { transfer_id } => print_json(&api.get(transfer_id).await?),
        TransfersSubcommand::Reference { reference } => print_json(&api.by_reference(&reference).await?),
        TransfersSubcommand::Cancel { transfer_id, reason } => print_json(&api.cancel(transfer_id, &reason).await?),
    }
}

async fn run_admin(ctx: &mut CliContext, admin: AdminCommand) -> Result<(), CliError> {
    let api = ctx.client.admin();
    match admin.command {
        AdminSubcommand::Overview => {
            let overview =
                load_overview(&ctx.client, &mut ctx.toasts).await.ok_or(CliError::LoadFailed("admin overview"))?;
            let stats = overview.stats();
            print_json(&json!({
                "totalBalance": format_eur(stats.total_balance),
                "transactionVolume": format_eur(stats.transaction_volume),
                "transferVolume": format_eur(stats.transfer_volume),
                "accounts": stats.total_accounts,
                "users": stats.total_users,
                "transactions": stats.total_transactions,
                "transfers": stats.total_transfers,
                "pendingTransfers": stats.pending_transfers,
                "accountTypes": overview
                    .account_distribution()
                    .into_iter()
                    .map(|(kind, count)| json!({ "type": kind.as_str(), "count": count }))
                    .collect::<Vec<_>>(),
                "monthly": overview
                    .monthly_activity()
                    .into_iter()
                    .map(|m| json!({ "month": m.month.label(), "count": m.count, "volume": format_eur(m.volume) }))
                    .collect::<Vec<_>>(),
                "recent": overview.recent_transactions().iter().map(history_row).collect::<Vec<_>>(),
                "pendingQueue": overview
                    .pending_queue()
                    .iter()
                    .map(|t| json!({ "reference": t.reference_number, "amount": format_eur(t.amount), "to": t.to_iban }))
                    .collect::<Vec<_>>(),
            }))
        }
        AdminSubcommand::Accounts => print_json(&api.all_accounts().await?),
        AdminSubcommand::CreateAccount { user_id, name, account_type, initial_balance } => {
            let request = AccountCreationRequest {
                account_name: name,
                account_type: match account_type {
                    AccountTypeArg::Checking => AccountType::Checking,
                    AccountTypeArg::Savings => AccountType::Savings,
                },
                initial_balance,
                user_id,
            };
            print_json(&api.create_account(&request).await?)
        }
        AdminSubcommand::Transactions => print_json(&api.all_transactions().await?),
        AdminSubcommand::Reverse { transaction_id, reason } => {
            print_json(&api.reverse_transaction(transaction_id, &reason).await?)
        }
        AdminSubcommand::Transfers => print_json(&api.all_transfers().await?),
        AdminSubcommand::Pending => print_json(&api.pending_transfers().await?),
        AdminSubcommand::Users => print_json(&api.users().await),
        AdminSubcommand::User { user_id } => print_json(&api.user(user_id).await),
        AdminSubcommand::UpdateUser { user_id, username, email, first_name, last_name, role } => {
            let patch = UserPatch {
                username,
                email,
                first_name,
                last_name,
                role: role.map(|r| match r {
                    RoleArg::Client => Role::Client,
                    RoleArg::Admin => Role::Admin,
                }),
            };
            print_json(&api.update_user(user_id, &patch).await)
        }
        AdminSubcommand::DeleteUser { user_id } => {
            api.delete_user(user_id).await;
            Ok(())
        }
    }
}

async fn run_profile(ctx: &mut CliContext, profile: ProfileCommand) -> Result<(), CliError> {
    match profile.command {
        ProfileSubcommand::Show => print_json(&ctx.client.profile().get().await?),
        ProfileSubcommand::Update { first_name, last_name, email } => {
            let message = ctx
                .session
                .update_profile(&ProfileUpdateRequest { first_name, last_name, email })
                .await?;
            ctx.toasts.success(message);
            print_whoami(ctx)
        }
    }
}

async fn run_dashboard(ctx: &mut CliContext) -> Result<(), CliError> {
    let mut view = DashboardView::default();
    if !view.reload(&ctx.client, &mut ctx.toasts).await {
        return Err(CliError::LoadFailed("dashboard"));
    }
    let data = &view.data;
    let today = Local::now().date_naive();
    let this_month = data.month_totals(MonthKey { year: today.year(), month: today.month() });

    print_json(&json!({
        "totalBalance": format_eur(data.total_balance()),
        "thisMonth": {
            "income": format_eur(this_month.income),
            "expenses": format_eur(this_month.expenses),
            "transactions": data.month_count(this_month.month),
        },
        "averageAmount": data.average_amount().map(format_eur),
        "accounts": data
            .accounts
            .iter()
            .map(|a| json!({ "name": a.account_name, "iban": format_iban(&a.iban), "balance": format_eur(a.balance) }))
            .collect::<Vec<_>>(),
        "balanceByType": data
            .balance_by_type()
            .into_iter()
            .map(|(kind, balance)| json!({ "type": kind.as_str(), "balance": format_eur(balance) }))
            .collect::<Vec<_>>(),
        "monthly": data
            .monthly_flow()
            .into_iter()
            .map(|f| json!({ "month": f.month.label(), "income": format_eur(f.income), "expenses": format_eur(f.expenses) }))
            .collect::<Vec<_>>(),
        "recent": data.recent_transactions().iter().map(history_row).collect::<Vec<_>>(),
    }))
}

fn flush_toasts(toasts: &mut Toasts) {
    for toast in toasts.take_all() {
        match toast.kind {
            ToastKind::Success => eprintln!("{}", toast.message),
            ToastKind::Error => eprintln!("error: {}", toast.message),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
