mod input;
mod render;

use std::fmt;
use std::sync::Arc;

use quiz_core::model::{QuestionId, UserQuery};
use services::config::parse_count;
use services::{AccessToken, AnswerDraft, ApiClient, ApiConfig, PlayerConfig, QuizPlayer};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::input::{Input, foreign_choice, parse_line};
use crate::render::{Screen, render};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument(&'static str),
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument(name) => write!(f, "missing required argument: {name}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_number(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let raw = require_value(args, flag)?;
    parse_count(flag, &raw).map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn require_question_id(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<QuestionId, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse::<QuestionId>()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play  [--api-url <url>] [--token <token>] [--count <n>]");
    eprintln!("  cargo run -p app -- users [--page <n>] [--size <n>] [--search <text>]");
    eprintln!("  cargo run -p app -- add-answer --question <id> --content <text> [--correct]");
    eprintln!("  cargo run -p app -- questions [--id <id>]");
    eprintln!("  cargo run -p app -- forgot-password <email>");
    eprintln!("  cargo run -p app -- change-password --old <password> --new <password>");
    eprintln!();
    eprintln!("Every command also accepts --api-url and --token.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_ACCESS_TOKEN, QUIZ_QUESTION_COUNT, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play,
    Users {
        query: UserQuery,
    },
    AddAnswer {
        question: Option<QuestionId>,
        content: Option<String>,
        correct: bool,
    },
    Questions {
        id: Option<QuestionId>,
    },
    ForgotPassword {
        email: Option<String>,
    },
    ChangePassword {
        old: Option<String>,
        new: Option<String>,
    },
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "users" => Some(Self::Users {
                query: UserQuery::default(),
            }),
            "add-answer" => Some(Self::AddAnswer {
                question: None,
                content: None,
                correct: false,
            }),
            "questions" => Some(Self::Questions { id: None }),
            "forgot-password" => Some(Self::ForgotPassword { email: None }),
            "change-password" => Some(Self::ChangePassword {
                old: None,
                new: None,
            }),
            _ => None,
        }
    }
}

struct Args {
    command: Command,
    api: ApiConfig,
}

impl Args {
    fn parse(
        mut command: Command,
        mut api: ApiConfig,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        while let Some(arg) = args.next() {
            match (arg.as_str(), &mut command) {
                ("--api-url", _) => {
                    let value = require_value(args, "--api-url")?;
                    let token = api.access_token.take();
                    let count = api.question_count;
                    api = ApiConfig::new(&value)?.with_question_count(count);
                    api.access_token = token;
                }
                ("--token", _) => {
                    api.access_token = Some(AccessToken::new(require_value(args, "--token")?));
                }
                ("--count", Command::Play) => {
                    api.question_count = Some(require_number(args, "--count")?);
                }
                ("--page", Command::Users { query }) => {
                    let page = require_number(args, "--page")?;
                    *query = query.clone().with_page(page);
                }
                ("--size", Command::Users { query }) => {
                    let size = require_number(args, "--size")?;
                    *query = query.clone().with_page_size(size);
                }
                ("--search", Command::Users { query }) => {
                    let keyword = require_value(args, "--search")?;
                    *query = query.clone().with_keyword(keyword);
                }
                ("--question", Command::AddAnswer { question, .. }) => {
                    *question = Some(require_question_id(args, "--question")?);
                }
                ("--id", Command::Questions { id }) => {
                    *id = Some(require_question_id(args, "--id")?);
                }
                ("--old", Command::ChangePassword { old, .. }) => {
                    *old = Some(require_value(args, "--old")?);
                }
                ("--new", Command::ChangePassword { new, .. }) => {
                    *new = Some(require_value(args, "--new")?);
                }
                ("--content", Command::AddAnswer { content, .. }) => {
                    *content = Some(require_value(args, "--content")?);
                }
                ("--correct", Command::AddAnswer { correct, .. }) => *correct = true,
                ("--help" | "-h", _) => return Ok(None),
                (value, Command::ForgotPassword { email }) if !value.starts_with('-') => {
                    *email = Some(value.to_string());
                }
                _ => return Err(ArgsError::UnknownArg(arg.clone()).into()),
            }
        }

        Ok(Some(Self { command, api }))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "services=info,app=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let (command, rest) = match argv.first().map(String::as_str) {
        None => (Command::Play, &argv[..]),
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => (Command::Play, &argv[..]),
        Some(first) => {
            let command = Command::from_arg(first).ok_or_else(|| {
                eprintln!("unknown subcommand: {first}");
                print_usage();
                ArgsError::UnknownArg(first.to_string())
            })?;
            (command, &argv[1..])
        }
    };

    let mut iter = rest.iter().cloned();
    let parsed = Args::parse(command, ApiConfig::from_env()?, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(parsed) = parsed else {
        print_usage();
        return Ok(());
    };

    let client = ApiClient::new(&parsed.api);
    tracing::debug!(base_url = %client.base_url(), "api client ready");

    match parsed.command {
        Command::Play => play(client, PlayerConfig::from_api(&parsed.api)?).await,
        Command::Users { query } => {
            let token = parsed.api.require_token()?;
            let page = client.list_users(token, &query).await?;
            for user in &page.users {
                let roles: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
                println!(
                    "{:>5}  {:<30}  {:<20}  {}",
                    user.id.value(),
                    user.email,
                    user.name,
                    roles.join(", ")
                );
            }
            println!("page {}/{}", query.page(), page.total_pages.max(1));
            Ok(())
        }
        Command::AddAnswer {
            question,
            content,
            correct,
        } => {
            let token = parsed.api.require_token()?;
            let draft = AnswerDraft {
                question_id: question.ok_or(ArgsError::MissingArgument("--question"))?,
                content: content.ok_or(ArgsError::MissingArgument("--content"))?,
                is_correct: correct,
            };
            let ack = client.create_answer(token, &draft).await?;
            println!("{}", ack.message.unwrap_or_else(|| "answer created".into()));
            Ok(())
        }
        Command::Questions { id: None } => {
            let token = parsed.api.require_token()?;
            for question in client.list_questions(token).await? {
                println!("{:>5}  {}", question.id.value(), question.title);
            }
            Ok(())
        }
        Command::Questions { id: Some(id) } => {
            let token = parsed.api.require_token()?;
            let detail = client.question(token, id).await?;
            println!("{}", detail.title);
            for answer in &detail.answers {
                let mark = if answer.is_correct { '*' } else { ' ' };
                println!("  {mark} {}: {}", answer.id, answer.content);
            }
            Ok(())
        }
        Command::ChangePassword { old, new } => {
            let token = parsed.api.require_token()?;
            let old = old.ok_or(ArgsError::MissingArgument("--old"))?;
            let new = new.ok_or(ArgsError::MissingArgument("--new"))?;
            let ack = client.change_password(token, &old, &new).await?;
            println!("{}", ack.message.unwrap_or_else(|| "password changed".into()));
            Ok(())
        }
        Command::ForgotPassword { email } => {
            let email = email.ok_or(ArgsError::MissingArgument("<email>"))?;
            let ack = client.forgot_password(&email).await?;
            println!(
                "{}",
                ack.message
                    .unwrap_or_else(|| "check your inbox for a reset link".into())
            );
            Ok(())
        }
    }
}

async fn play(client: ApiClient, config: PlayerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(client);
    let handle = QuizPlayer::spawn(client.clone(), client, config);
    let mut updates = handle.subscribe();
    let mut screen = Screen::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(text) = screen.update(&handle.snapshot()) {
        println!("{text}");
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = updates.borrow_and_update().clone();
                if let Some(text) = screen.update(&session) {
                    println!("{text}");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Input::Events(events) => {
                        let session = handle.snapshot();
                        for event in events {
                            if let Some(id) = foreign_choice(&session, &event) {
                                println!("answer {id} is not on this question");
                                continue;
                            }
                            handle.dispatch(event)?;
                        }
                    }
                    Input::Quit => break,
                    Input::Help => {
                        println!("start | <answer ids> | next | restart | quit");
                        println!("{}", render(&handle.snapshot()));
                    }
                    Input::Empty => {}
                    Input::Unknown(raw) => println!("unrecognized input: {raw} (type `help`)"),
                }
            }
        }
    }

    let session = handle.snapshot();
    tracing::info!(high_score = session.high_score(), "leaving quiz");
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
