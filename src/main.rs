extern crate asm85;
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

use asm85::assembler::ast::{NodeData, SyntaxTree};
use asm85::assembler::diagnostic::Severity;
use asm85::assembler::lexer;
use asm85::assembler::parser;
use asm85::assembler::printer::AstPrinter;
use asm85::assembler::session::{Options, Session};
use asm85::assembler::token::TokenKind;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tDebug: {}\n\tTokens: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        args.is_present("debug"),
        args.is_present("tokens"),
        args.value_of("INPUT").unwrap()
    );

    let ifile = args.value_of("INPUT").unwrap();
    let options = Options {
        debug: args.is_present("debug"),
        ..Options::default()
    };

    let mut session = match Session::new(ifile, options) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        },
        Ok(session) => session,
    };

    if args.is_present("tokens") {
        let mut scanner = Session::with_source(ifile, session.source(), session.mode());
        scanner.set_skip_trivia(!args.is_present("trivia"));
        if let Err(err) = print_tokens(&mut scanner) {
            error!("fatal: {}", err);
            std::process::exit(1);
        }
    }

    if let Err(err) = parser::parse(&mut session) {
        error!("fatal: {}", err);
        std::process::exit(1);
    }

    for diagnostic in session.diagnostics() {
        let text = session.format_diagnostic(diagnostic);
        match diagnostic.severity {
            Severity::Error   => error!("{}", text),
            Severity::Warning => warn!("{}", text),
            Severity::Note    => info!("{}", text),
        }
    }

    if let Some(tree) = session.syntax_tree() {
        if args.is_present("print-debug") {
            print_tree(tree);
        }
        if args.is_present("print") {
            print!("{}", AstPrinter::print(tree));
        }
    }

    let errors = session.diagnostics().iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        error!("Stopped assembly due to {} error(s).", errors);
        std::process::exit(1);
    }
}

fn print_tokens(session: &mut Session) -> asm85::assembler::error::Result<()> {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    loop {
        let kind = lexer::scan(session)?;
        if kind == TokenKind::EndOfFile {
            break;
        }
        let class = match session.identifier_class() {
            Some(class) => format!("{:?}", class),
            None => String::new(),
        };
        let group = if kind.is_trivia() {
            "trivia"
        } else if kind.is_literal() {
            "literal"
        } else if kind.is_punctuator() {
            "punctuator"
        } else {
            ""
        };
        grid.add(Cell::from(format!("0x{:04X}:", session.token_position())));
        grid.add(Cell::from(group.to_string()));
        grid.add(Cell::from(format!("{:?}", kind)));
        grid.add(Cell::from(format!("{:?}", session.token_lexeme())));
        grid.add(Cell::from(class));
    }

    println!("{}", grid.fit_into_columns(5));
    Ok(())
}

fn print_tree(tree: &SyntaxTree) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (id, node) in tree.iter() {
        let detail = match &node.data {
            NodeData::Identifier(identifier) => identifier.text.clone(),
            NodeData::Integer(integer) => format!("0x{:X}", integer.value),
            _ => String::new(),
        };
        grid.add(Cell::from(format!("#{}", id.index())));
        grid.add(Cell::from(format!("0x{:04X}+{}", node.position, node.length)));
        grid.add(Cell::from(format!("{:?}", node.kind())));
        grid.add(Cell::from(match node.parent() {
            Some(parent) => format!("^#{}", parent.index()),
            None => "root".to_string(),
        }));
        grid.add(Cell::from(detail));
    }

    println!("{}", grid.fit_into_columns(5));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("debug")
            .short("g")
            .long("debug")
            .takes_value(false)
            .help("collects every diagnostic with its location instead of stopping at the first error"))
        .arg(Arg::with_name("tokens")
            .short("t")
            .takes_value(false)
            .help("prints the token stream to STDOUT"))
        .arg(Arg::with_name("trivia")
            .long("trivia")
            .takes_value(false)
            .requires("tokens")
            .help("includes spaces, terminators and comments in the token stream"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the syntax tree nodes to STDOUT"))
        .arg(Arg::with_name("print")
            .short("p")
            .takes_value(false)
            .help("prints the normalized source to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
