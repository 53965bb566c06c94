use launch_descriptor::cli::{Cli, CliCommand, CliError};

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let render_config = match Cli::init()? {
        CliCommand::Quit(one_shot) => return one_shot.run_one_shot(),
        CliCommand::Render(render_config) => render_config,
    };

    render_config.run(&mut std::io::stdout().lock())
}
