use babygids::app::status::checklist_progress;
use babygids::config::{ChecklistCommand, Command, SettingsCommand};
use babygids::core::advice::{Fallback, Outcome, RequestState};
use babygids::utils::error::{ErrorCategory, Result};
use babygids::utils::{logger, validation::Validate};
use babygids::{
    AdviceAnswer, AdviceService, AgendaEntry, AppConfig, CliConfig, FileStore, GeminiProvider,
    Profile, Session, StatusDisplay,
};
use chrono::Utc;
use clap::Parser;

type App = (
    AppConfig,
    Session<FileStore>,
    AdviceService<GeminiProvider>,
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let result = match build_app(&cli) {
        Ok(app) => run(cli.command, app).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn build_app(cli: &CliConfig) -> Result<App> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    config.validate()?;

    let session = Session::new(FileStore::new(&config.storage.data_dir));
    let provider = GeminiProvider::new(config.provider.endpoint.clone(), config.resolved_api_key());
    let advice = AdviceService::new(provider).with_web_search(config.provider.web_search);
    Ok((config, session, advice))
}

async fn run(command: Command, (config, session, advice): App) -> Result<()> {
    match command {
        Command::Setup { name, date } => {
            let profile = Profile::new(name.trim(), date);
            session.save_profile(&profile).await?;
            print_status(&profile);
        }
        Command::Status => {
            let profile = session.require_profile().await?;
            print_status(&profile);
            let checklist = session.checklist().await?;
            println!("To-do lijst: {}", checklist_progress(&checklist));
        }
        Command::Ask { question } => {
            let profile = session.require_profile().await?;
            let settings = session.settings().await?;
            let question = question.join(" ");

            tracing::info!("⏳ Vraag wordt verstuurd ({})", settings.model);
            let result = advice
                .ask_question(&question, profile.reference_date, &settings)
                .await;
            match result {
                Err(e) if e.category() == ErrorCategory::Input => return Err(e),
                Err(e) => {
                    // 顯示備用回答，再回報錯誤
                    print_answer(&RequestState::Failed {
                        fallback: AdviceAnswer::fallback(),
                        reason: e.to_string(),
                    });
                    return Err(e);
                }
                ok => print_answer(&RequestState::settle(ok)),
            }
        }
        Command::Agenda { weeks, show } => {
            if show {
                match session.saved_agenda().await? {
                    Some(saved) => {
                        println!("Agenda voor {} weken", saved.num_weeks);
                        print_agenda(&saved.entries);
                    }
                    None => println!("Nog geen agenda opgeslagen."),
                }
                return Ok(());
            }

            let profile = session.require_profile().await?;
            let settings = session.settings().await?;
            let num_weeks = weeks.unwrap_or(config.agenda.default_weeks);

            tracing::info!("⏳ Agenda voor {} weken wordt gemaakt", num_weeks);
            let outcome = match advice
                .generate_agenda(profile.reference_date, num_weeks, &settings)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    if e.category() != ErrorCategory::Input {
                        print_agenda(&Vec::<AgendaEntry>::fallback());
                    }
                    return Err(e);
                }
            };
            if let Outcome::Recovered { reason, .. } = &outcome {
                tracing::warn!("Agenda response unusable: {}", reason);
            }
            let entries = outcome.into_value();
            session.save_agenda(&entries, num_weeks).await?;
            print_agenda(&entries);
        }
        Command::Checklist { action } => match action.unwrap_or(ChecklistCommand::List) {
            ChecklistCommand::List => {
                let items = session.checklist().await?;
                println!("To-do lijst ({})", checklist_progress(&items));
                for item in &items {
                    let mark = if item.completed { "✔" } else { " " };
                    println!("[{}] {:>14}  {}", mark, item.id, item.text);
                }
            }
            ChecklistCommand::Add { text } => {
                let item = session.add_checklist_item(&text.join(" ")).await?;
                println!("Toegevoegd: {} ({})", item.text, item.id);
            }
            ChecklistCommand::Toggle { id } => {
                let item = session.toggle_checklist_item(&id).await?;
                let state = if item.completed { "afgerond" } else { "open" };
                println!("{}: {}", item.text, state);
            }
        },
        Command::Settings { action } => match action.unwrap_or(SettingsCommand::Show) {
            SettingsCommand::Show => {
                let settings = session.settings().await?;
                println!("Thema: {:?}", settings.theme);
                println!("Model: {}", settings.model);
                let key = match settings.api_credential() {
                    Some(_) => "opgeslagen",
                    None if config.resolved_api_key().is_some() => "uit omgeving/configuratie",
                    None => "niet ingesteld",
                };
                println!("API-sleutel: {}", key);
            }
            SettingsCommand::Set {
                theme,
                model,
                api_key,
            } => {
                let mut settings = session.settings().await?;
                if let Some(theme) = theme {
                    settings.theme = theme.into();
                }
                if let Some(model) = model {
                    settings.model = model.into();
                }
                if let Some(key) = api_key {
                    settings.api_key = Some(key).filter(|k| !k.trim().is_empty());
                }
                session.save_settings(&settings).await?;
                println!("Instellingen opgeslagen.");
            }
        },
        Command::Reset { yes } => {
            if !yes {
                println!("Alle gegevens worden gewist. Bevestig met --yes.");
                return Ok(());
            }
            session.reset().await?;
            println!("Alle gegevens zijn gewist.");
        }
    }

    Ok(())
}

fn print_status(profile: &Profile) {
    let status = StatusDisplay::for_profile(profile, Utc::now());
    println!("{}", status.greeting);
    println!("Status: {}", status.label);
    println!("{}", status.sub);
}

fn print_answer(state: &RequestState<AdviceAnswer>) {
    if let RequestState::Failed { reason, .. } = state {
        tracing::warn!("Answer unavailable: {}", reason);
    }
    let Some(answer) = state.value() else {
        return;
    };
    println!("{}", answer.answer_text);
    if !answer.sources.is_empty() {
        println!();
        println!("Bronnen:");
        for source in &answer.sources {
            println!("- {} <{}>", source.title, source.url);
        }
    }
}

fn print_agenda(entries: &[AgendaEntry]) {
    if entries.is_empty() {
        println!("Er kon geen agenda worden gemaakt. Probeer het opnieuw.");
        return;
    }
    for entry in entries {
        println!("Week {}: {}", entry.week, entry.title);
        println!("  {}", entry.description);
        println!("  Bron: {} <{}>", entry.source_name, entry.source_url);
    }
}
