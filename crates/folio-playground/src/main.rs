//! `folio` command-line front end

use anyhow::{bail, Context as _, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use folio_playground::{
    FileTarget, FragmentKind, Playground, PlaygroundConfig, RenderTarget, RenderedDocument,
};
use folio_site::{ContactLink, ContactMessage};
use folio_template::{load_dir, TemplateRegistry};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("folio")
        .version(folio_playground::VERSION)
        .about("Live code playground renderer")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("templates")
                .about("List example templates")
                .arg(
                    Arg::new("templates-dir")
                        .long("templates-dir")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Directory of extra templates"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a template or fragment files to a complete document")
                .arg(
                    Arg::new("template")
                        .long("template")
                        .short('t')
                        .help("Template to start from"),
                )
                .arg(fragment_arg("html", "Structure fragment file"))
                .arg(fragment_arg("css", "Presentation fragment file"))
                .arg(fragment_arg("js", "Behavior fragment file"))
                .arg(
                    Arg::new("frame")
                        .long("frame")
                        .action(ArgAction::SetTrue)
                        .help("Wrap the document in a sandboxed <iframe srcdoc>"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Write to this file instead of stdout"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Playground config (TOML)"),
                )
                .arg(
                    Arg::new("templates-dir")
                        .long("templates-dir")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Directory of extra templates"),
                ),
        )
        .subcommand(
            Command::new("contact")
                .about("Build a messaging deep link from a contact submission")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("subject").long("subject").required(true))
                .arg(Arg::new("message").long("message").required(true))
                .arg(
                    Arg::new("phone")
                        .long("phone")
                        .required(true)
                        .help("Recipient number, digits only after separators are removed"),
                )
                .arg(
                    Arg::new("recipient")
                        .long("recipient")
                        .help("Recipient name used in the greeting"),
                ),
        )
}

fn fragment_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::value_parser!(PathBuf))
        .help(help)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn registry(extra: Option<&Path>) -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::with_builtins();
    if let Some(dir) = extra {
        let templates =
            load_dir(dir).with_context(|| format!("loading templates from {}", dir.display()))?;
        registry.extend(templates);
    }
    Ok(registry)
}

fn list_templates(args: &ArgMatches) -> Result<()> {
    let registry = registry(args.get_one::<PathBuf>("templates-dir").map(PathBuf::as_path))?;
    for template in registry.iter() {
        println!("{:<12} {}", template.name(), template.title());
    }
    Ok(())
}

fn render(args: &ArgMatches) -> Result<()> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => PlaygroundConfig::load(path)?,
        None => PlaygroundConfig::default(),
    };
    let templates_dir = args
        .get_one::<PathBuf>("templates-dir")
        .cloned()
        .or_else(|| config.templates_dir.clone());
    let registry = registry(templates_dir.as_deref())?;

    let template = args.get_one::<String>("template").cloned();
    if let Some(name) = &template {
        if !registry.contains(name) {
            bail!(
                "unknown template {name:?} (available: {})",
                registry.names().join(", ")
            );
        }
    }
    config.default_template = None;

    let frame = args.get_flag("frame");
    let builder = Playground::builder().config(config).registry(registry);
    let document = match args.get_one::<PathBuf>("out") {
        Some(path) => {
            let target = FileTarget::new(path).with_frame(frame);
            let document = run(builder.target(target).build(), template.as_deref(), args)?;
            eprintln!("wrote {}", path.display());
            document
        }
        None => {
            let document = run(builder.build(), template.as_deref(), args)?;
            if frame {
                println!("{}", document.to_frame());
            } else {
                print!("{}", document.html());
            }
            document
        }
    };

    if let Some(err) = document.error() {
        eprintln!("behavior error contained: {err}");
    }
    Ok(())
}

fn run<T: RenderTarget>(
    mut playground: Playground<T>,
    template: Option<&str>,
    args: &ArgMatches,
) -> Result<RenderedDocument> {
    if let Some(name) = template {
        playground.load_template(name);
    }
    for kind in FragmentKind::ALL {
        if let Some(path) = args.get_one::<PathBuf>(kind.label()) {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {kind} fragment {}", path.display()))?;
            playground.set_buffer(kind, text);
        }
    }

    let document = playground.render().clone();
    for line in document.outcome().iter().flat_map(|report| &report.console) {
        tracing::debug!(level = ?line.level, "console: {}", line.text);
    }
    Ok(document)
}

fn contact(args: &ArgMatches) -> Result<()> {
    let value = |name: &str| args.get_one::<String>(name).cloned().unwrap_or_default();
    let message = ContactMessage::new(
        value("name"),
        value("email"),
        value("subject"),
        value("message"),
    );

    let mut link = ContactLink::new(&value("phone"))?;
    if let Some(recipient) = args.get_one::<String>("recipient") {
        link = link.with_recipient(recipient);
    }
    let url = link.build(&message)?;
    println!("{url}");
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("templates", args)) => list_templates(args),
        Some(("render", args)) => render(args),
        Some(("contact", args)) => contact(args),
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
