use sake::cli;
use sake::diag::SourceMap;
use sake::dispatch::ProcessDispatcher;
use sake::script::interp::Interpreter;
use sake::script::lexer::tokenize;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("sake: {e}");
            eprintln!("{}", cli::usage());
            std::process::exit(1);
        }
    };
    if args.help {
        eprintln!("{}", cli::usage());
        return;
    }

    let mut src = match std::fs::read_to_string(&args.script) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("sake: {}: {e}", args.script.display());
            std::process::exit(1);
        }
    };
    if src.is_empty() {
        eprintln!("sake: malformed file");
        std::process::exit(1);
    }

    // Each trailing argument is its own statement after the script's text.
    for cmd in &args.commands {
        if !src.ends_with('\n') {
            src.push('\n');
        }
        src.push_str(cmd);
        src.push(';');
    }

    let file = args.script.display().to_string();
    let map = SourceMap::new(&src, &file);

    let lex = match tokenize(&src) {
        Ok(lex) => lex,
        Err(e) => {
            eprintln!("{}", map.render_error(&e));
            std::process::exit(1);
        }
    };
    if lex.tokens.is_empty() {
        return;
    }

    let mut interp = Interpreter::new(lex);
    let mut dispatcher = ProcessDispatcher::new();
    if let Err(e) = interp.run(&mut dispatcher) {
        eprintln!("{}", map.render_error(&e));
        std::process::exit(1);
    }
}
