use anyhow::Context;
use clap::Parser;
use lunchman::core::codec::parse_date;
use lunchman::utils::{logger, validation::Validate};
use lunchman::{
    build_storage, CliConfig, Command, CsvStorage, LunchError, LunchOverview, LunchService,
    TomlConfig,
};

fn main() {
    let cli = CliConfig::parse();

    // 載入配置 (日誌格式由配置決定)
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    logger::init_logger(config.logging.format, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| config.validate_for_cli()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(&cli, &config) {
        match e.downcast_ref::<LunchError>() {
            Some(lunch_error) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?})",
                    command_name(&cli.command),
                    lunch_error,
                    lunch_error.category()
                );
                eprintln!("❌ {}", lunch_error.user_friendly_message());
                std::process::exit(lunch_error.exit_code());
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Init => "init",
        Command::Show => "show",
        Command::ChangeApprentice { .. } => "change-apprentice",
        Command::AssignMenu { .. } => "assign-menu",
        Command::Order { .. } => "order",
        Command::RemoveOrder { .. } => "remove-order",
        Command::AddGuest { .. } => "add-guest",
        Command::UpdateRota { .. } => "update-rota",
    }
}

fn run(cli: &CliConfig, config: &TomlConfig) -> anyhow::Result<()> {
    if let Command::Init = cli.command {
        let storage =
            CsvStorage::initialise(&config.storage.data_dir, config.storage.files.clone())?;
        println!("✅ Data directory ready: {}", storage.dir().display());
        return Ok(());
    }

    // 建立存儲與服務
    let storage = build_storage(&config.storage)?;
    let mut service = LunchService::new(storage, config.rota.weeks);

    match &cli.command {
        Command::Init | Command::Show => {}
        Command::ChangeApprentice { position, name } => {
            service.change_apprentice(*position, name)?;
        }
        Command::AssignMenu { restaurant } => {
            let chosen = service.assign_menu(*restaurant)?;
            println!("🍽  Menu chosen: {} ({})", chosen.name(), chosen.menu_link());
        }
        Command::Order { employee, order } => service.place_order(*employee, order)?,
        Command::RemoveOrder { employee } => service.remove_order(*employee)?,
        Command::AddGuest { name, order } => service.add_guest(name, order)?,
        Command::UpdateRota { today } => {
            let today = match today {
                Some(value) => parse_date(value)
                    .with_context(|| format!("--today must be yyyy-MM-dd, got '{}'", value))?,
                None => chrono::Local::now().date_naive(),
            };
            let dropped = service.update_rota(today)?;
            println!("🔄 Rota updated, {} past lunch(es) dropped", dropped);
        }
    }

    let overview = service.overview()?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print_overview(&overview);
    }
    Ok(())
}

fn print_overview(overview: &LunchOverview) {
    println!("📅 Schedule");
    for (position, lunch) in overview.schedule.iter().enumerate() {
        let apprentice = lunch.apprentice().map(|a| a.name()).unwrap_or("(unassigned)");
        match lunch.restaurant() {
            Some(restaurant) => println!(
                "  [{}] {}  {}  🍽  {} {}",
                position,
                lunch.date(),
                apprentice,
                restaurant.name(),
                restaurant.menu_link()
            ),
            None => println!("  [{}] {}  {}", position, lunch.date(), apprentice),
        }
    }

    if overview
        .current_lunch()
        .is_some_and(|lunch| lunch.restaurant().is_none())
    {
        println!("\nPlease choose a menu:");
        for (index, restaurant) in overview.restaurants.iter().enumerate() {
            println!("  [{}] {}  {}", index, restaurant.name(), restaurant.menu_link());
        }
        return;
    }

    println!("\n🧾 Orders");
    for (index, employee) in overview.employees.iter().enumerate() {
        println!("  [{}] {}: {}", index, employee.name(), employee.order().unwrap_or("-"));
    }

    if !overview.guests.is_empty() {
        println!("\n👥 Guests");
        for guest in &overview.guests {
            println!("  {}: {}", guest.name(), guest.order().unwrap_or("-"));
        }
    }
}

