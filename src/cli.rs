//! Command line front end

use crate::app::App;
use crate::auth;
use crate::config::SurveyConfig;
use crate::export;
use crate::state::{DetailedLeadForm, OsFormInput, OsFormType, SurveyForm};
use crate::store::FileStore;
use crate::survey::{resolve_material_code_mode, DraftField, FormType, MaterialCodeMode};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldsurvey")]
#[command(about = "Lead intake and Factory UX field surveys")]
#[command(
    after_help = "Environment:\n  FIELDSURVEY_DATA_DIR   Record store directory\n  RUST_LOG               Log filter (default fieldsurvey=info)"
)]
pub struct Cli {
    /// Record store directory for this invocation
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Accounts and sessions
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// List the Factory UX form types
    Forms,
    /// Show headings, or the options a heading resolves to
    Options {
        form_type: String,
        #[arg(long)]
        heading: Option<String>,
    },
    Lead {
        #[command(subcommand)]
        command: LeadCommand,
    },
    /// Factory UX surveys
    Survey {
        #[command(subcommand)]
        command: SurveyCommand,
    },
    /// Factory OS forms
    Os {
        #[command(subcommand)]
        command: OsCommand,
    },
    /// Machine safety notes
    Safety {
        #[command(subcommand)]
        command: SafetyCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
}

#[derive(Args)]
struct LeadDetailArgs {
    /// Existing company name, or a new one
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    customer_details: Option<String>,
    #[arg(long)]
    field_observation: Option<String>,
    #[arg(long)]
    discussion: Option<String>,
    #[arg(long)]
    insights: Option<String>,
    #[arg(long)]
    remarks: Option<String>,
    /// Value in crore
    #[arg(long)]
    business_potential: Option<String>,
}

#[derive(Subcommand)]
enum LeadCommand {
    New {
        #[arg(long)]
        state: String,
        #[arg(long)]
        place: String,
        #[command(flatten)]
        details: LeadDetailArgs,
    },
    List,
    Show {
        lead_no: String,
    },
    Edit {
        lead_no: String,
        #[command(flatten)]
        details: LeadDetailArgs,
    },
    Delete {
        lead_no: String,
    },
    /// Print all leads as tab separated rows
    Export,
}

#[derive(Subcommand)]
enum SurveyCommand {
    Submit {
        lead_no: String,
        form_type: String,
        #[arg(long)]
        heading: String,
        #[arg(long)]
        subheading: Option<String>,
        #[arg(long)]
        audit_category: Option<String>,
        #[arg(long)]
        material_code: Option<String>,
        #[arg(long)]
        hsn_code: Option<String>,
        #[arg(long)]
        height: Option<String>,
        #[arg(long)]
        uom: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    List {
        lead_no: String,
        #[arg(long)]
        form_type: Option<String>,
    },
    /// Print submissions as tab separated rows
    Export {
        lead_no: String,
        #[arg(long)]
        form_type: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum OsCommand {
    Submit {
        lead_no: String,
        form_type: String,
        #[arg(long, default_value = "")]
        company_name: String,
        #[arg(long, default_value = "")]
        contact_person: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value = "")]
        mail_content: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    List {
        lead_no: String,
    },
}

#[derive(Subcommand)]
enum SafetyCommand {
    Add { lead_no: String, notes: String },
    List { lead_no: String },
}

/// Execute a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = SurveyConfig::load()?;
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Forms => list_forms(),
        Commands::Options { form_type, heading } => show_options(&form_type, heading.as_deref()),
        Commands::User { command } => {
            let mut app = open_app(data_dir, &config).await?;
            run_user(&mut app, &mut config, command).await
        }
        Commands::Lead { command } => {
            let mut app = open_app(data_dir, &config).await?;
            run_lead(&mut app, &config, command).await
        }
        Commands::Survey { command } => {
            let mut app = open_app(data_dir, &config).await?;
            run_survey(&mut app, &config, command).await
        }
        Commands::Os { command } => {
            let mut app = open_app(data_dir, &config).await?;
            run_os(&mut app, &config, command).await
        }
        Commands::Safety { command } => {
            let mut app = open_app(data_dir, &config).await?;
            run_safety(&mut app, &config, command).await
        }
    }
}

async fn open_app(data_dir: Option<PathBuf>, config: &SurveyConfig) -> Result<App<FileStore>> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.resolve_data_dir()?,
    };
    let store = FileStore::open(data_dir).await?;
    tracing::debug!(data_dir = %store.root().display(), "using record store");
    Ok(App::new(store))
}

fn list_forms() -> Result<()> {
    for form_type in FormType::ALL {
        let mode = match resolve_material_code_mode(form_type.id())? {
            MaterialCodeMode::FreeText => "free text",
            MaterialCodeMode::FixedOptions(_) => "fixed",
        };
        println!("{form_type}\t{}\tmaterial code: {mode}", form_type.label());
    }
    Ok(())
}

async fn run_user(
    app: &mut App<FileStore>,
    config: &mut SurveyConfig,
    command: UserCommand,
) -> Result<()> {
    match command {
        UserCommand::Signup {
            username,
            password,
            confirm_password,
        } => {
            let user = app.signup(&username, &password, &confirm_password).await?;
            println!("Account created for {}", user.username);
        }
        UserCommand::Login { username, password } => {
            let session = app.login(&username, &password).await?;
            println!("Logged in as {}", session.username);
            config.session = Some(session);
            config.save()?;
        }
        UserCommand::Logout => {
            if auth::logout(config).is_some() {
                config.save()?;
            }
            println!("Logged out");
        }
        UserCommand::Whoami => println!("{}", auth::require_session(config)?.username),
    }
    Ok(())
}

fn show_options(form_type: &str, heading: Option<&str>) -> Result<()> {
    let mut form = SurveyForm::open(form_type)?;
    let Some(heading) = heading else {
        for heading in form.draft().policy().heading_options {
            println!("{heading}");
        }
        return Ok(());
    };

    form.set(DraftField::Heading, heading)?;
    let draft = form.draft();
    let resolutions = [
        (DraftField::Subheading, draft.subheadings()),
        (DraftField::AuditCategory, draft.audit_categories()),
    ];
    for (field, resolution) in resolutions {
        if resolution.is_empty() {
            println!("{}: (none)", field.label());
        } else if let Some(forced) = &resolution.forced {
            println!("{}: {forced} (fixed)", field.label());
        } else {
            println!("{}: {}", field.label(), resolution.options.join(" | "));
        }
    }
    let material_code = DraftField::MaterialCode.label();
    match draft.material_code_mode() {
        MaterialCodeMode::FreeText => println!("{material_code}: free text"),
        MaterialCodeMode::FixedOptions(codes) => {
            println!("{material_code}: {}", codes.join(" | "))
        }
    }
    Ok(())
}

fn apply_lead_details(form: &mut DetailedLeadForm, args: LeadDetailArgs) {
    if let Some(company) = args.company {
        form.set_company_name(&company);
    }
    let text_fields = [
        (&mut form.customer_details, args.customer_details),
        (&mut form.field_observation, args.field_observation),
        (&mut form.discussion, args.discussion),
        (&mut form.insights, args.insights),
        (&mut form.remarks, args.remarks),
        (&mut form.business_potential, args.business_potential),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            field.set_text(value);
        }
    }
}

async fn run_lead(
    app: &mut App<FileStore>,
    config: &SurveyConfig,
    command: LeadCommand,
) -> Result<()> {
    match command {
        LeadCommand::New {
            state,
            place,
            details,
        } => {
            let session = auth::require_session(config)?;
            let mut initial = app.start_lead(session).await?;
            initial.state.set_text(state);
            initial.place.set_text(place);
            let mut detailed = app.detail_lead(initial.to_initial()?).await?;
            apply_lead_details(&mut detailed, details);
            let lead = app.complete_lead(session, &initial, &detailed).await?;
            println!("Saved {}", lead.lead_no);
        }
        LeadCommand::List => {
            for lead in app.list_leads().await? {
                println!(
                    "{}\t{}\t{}, {}\t{}",
                    lead.lead_no,
                    lead.date,
                    lead.place,
                    lead.state,
                    lead.company_name()
                );
            }
        }
        LeadCommand::Show { lead_no } => {
            let lead = app.get_lead(&lead_no).await?;
            let record = export::lead_export_record(&lead);
            for (header, value) in export::LEAD_HEADERS.iter().zip(record) {
                println!("{header}: {value}");
            }
            let form_types = app.submission_form_types(&lead_no).await?;
            if !form_types.is_empty() {
                let labels: Vec<_> = form_types.iter().map(|t| t.label()).collect();
                println!("Surveys: {}", labels.join(", "));
            }
        }
        LeadCommand::Edit { lead_no, details } => {
            auth::require_session(config)?;
            let mut form = app.edit_lead(&lead_no).await?;
            apply_lead_details(&mut form, details);
            let lead = app.update_lead(&form).await?;
            println!("Updated {}", lead.lead_no);
        }
        LeadCommand::Delete { lead_no } => {
            auth::require_session(config)?;
            app.delete_lead(&lead_no).await?;
            println!("Deleted {lead_no}");
        }
        LeadCommand::Export => {
            println!("{}", export::to_tsv_line(&export::LEAD_HEADERS));
            for lead in app.list_leads().await? {
                println!("{}", export::to_tsv_line(&export::lead_export_record(&lead)));
            }
        }
    }
    Ok(())
}

async fn run_survey(
    app: &mut App<FileStore>,
    config: &SurveyConfig,
    command: SurveyCommand,
) -> Result<()> {
    match command {
        SurveyCommand::Submit {
            lead_no,
            form_type,
            heading,
            subheading,
            audit_category,
            material_code,
            hsn_code,
            height,
            uom,
            quantity,
            price,
        } => {
            let session = auth::require_session(config)?;
            let mut form = app.open_survey(&form_type)?;
            form.set(DraftField::Heading, &heading)?;
            let rest = [
                (DraftField::Subheading, subheading),
                (DraftField::AuditCategory, audit_category),
                (DraftField::MaterialCode, material_code),
                (DraftField::HsnCode, hsn_code),
                (DraftField::Height, height),
                (DraftField::Uom, uom),
                (DraftField::Quantity, quantity),
                (DraftField::Price, price),
            ];
            for (field, value) in rest {
                if let Some(value) = value {
                    form.set(field, &value)?;
                }
            }
            let submission = app.submit_survey(session, &lead_no, &mut form).await?;
            println!(
                "Saved {} ({}, total {})",
                submission.id,
                submission.form_type.label(),
                submission.values.total_amount
            );
        }
        SurveyCommand::List { lead_no, form_type } => {
            let form_type = form_type.map(|t| t.parse::<FormType>()).transpose()?;
            for submission in app.list_submissions(&lead_no, form_type).await? {
                println!(
                    "{}\t{}\t{} / {}\t{}",
                    submission.id,
                    submission.form_type,
                    submission.values.heading,
                    submission.values.subheading,
                    submission.values.total_amount
                );
            }
        }
        SurveyCommand::Delete { id } => {
            auth::require_session(config)?;
            app.delete_submission(&id).await?;
            println!("Deleted {id}");
        }
        SurveyCommand::Export { lead_no, form_type } => {
            let form_type = form_type.map(|t| t.parse::<FormType>()).transpose()?;
            println!("{}", export::to_tsv_line(&export::survey_headers()));
            for submission in app.list_submissions(&lead_no, form_type).await? {
                println!(
                    "{}",
                    export::to_tsv_line(&export::survey_export_record(&submission))
                );
            }
        }
    }
    Ok(())
}

async fn run_os(app: &mut App<FileStore>, config: &SurveyConfig, command: OsCommand) -> Result<()> {
    match command {
        OsCommand::Submit {
            lead_no,
            form_type,
            company_name,
            contact_person,
            subject,
            mail_content,
            notes,
        } => {
            let session = auth::require_session(config)?;
            let form_type: OsFormType = form_type.parse()?;
            let input = OsFormInput {
                company_name,
                contact_person,
                subject,
                mail_content,
                notes,
            };
            let submission = app
                .submit_os_form(session, &lead_no, form_type, input)
                .await?;
            println!("Saved {} ({})", submission.id, form_type.label());
        }
        OsCommand::List { lead_no } => {
            for submission in app.list_os_submissions(&lead_no).await? {
                println!(
                    "{}\t{}\t{}",
                    submission.id,
                    submission.form_type.label(),
                    submission.submitted_at.format("%d-%m-%Y %H:%M")
                );
            }
        }
    }
    Ok(())
}

async fn run_safety(
    app: &mut App<FileStore>,
    config: &SurveyConfig,
    command: SafetyCommand,
) -> Result<()> {
    match command {
        SafetyCommand::Add { lead_no, notes } => {
            let session = auth::require_session(config)?;
            let note = app.submit_safety_note(session, &lead_no, &notes).await?;
            println!("Saved {}", note.id);
        }
        SafetyCommand::List { lead_no } => {
            for note in app.list_safety_notes(&lead_no).await? {
                println!("{}\t{}", note.id, note.safety_notes);
            }
        }
    }
    Ok(())
}
