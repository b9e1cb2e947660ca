use clap::{arg, command, Parser, Subcommand};
use crossterm::{
    cursor::{MoveLeft, MoveRight, MoveUp},
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use dcp_cube::cubie::CubieCube;
use dcp_cube::facelet::{Color, FaceCube};
use dcp_cube::scramble::{gen_scramble, scramble_from_str, scramble_to_str};
use dcp_cube::solver::{solve as solver, SolveOptions};
use dcp_cube::Error;
use spinners::Spinner;
use std::{
    io::{self, stdout},
    time::Instant,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube using the two-phase coordinate search")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short, long, default_value_t = 24)]
        max: u8,

        #[arg(short, long, default_value_t = 3000)]
        timeout: u64,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates a scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(short, long)]
        preview: bool,
    },
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    max: u8,
    timeout: u64,
    preview: bool,
) -> Result<(), Error> {
    if let Some(scramble) = scramble {
        let moves = scramble_from_str(scramble)?;
        let state = CubieCube::default().apply_moves(&moves);
        let facelet = FaceCube::from(&state);
        if preview {
            print_facelet(&facelet)?;
        }
        solve_state(&facelet.to_string(), max, timeout)?;
    } else if let Some(facelet) = facelet {
        let facelet = FaceCube::try_from(facelet.as_str())?;
        if preview {
            print_facelet(&facelet)?;
        }
        solve_state(&facelet.to_string(), max, timeout)?;
    }
    Ok(())
}

fn solve_state(cubestring: &str, max: u8, timeout: u64) -> Result<(), Error> {
    let fc = FaceCube::try_from(cubestring)?;
    let cc = CubieCube::try_from(&fc)?;
    let options = SolveOptions {
        max_depth: max,
        timeout_ms: Some(timeout),
        verify_solution: true,
    };

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = solver(&cc, options)?;
    let elapsed = start.elapsed();

    spinner.stop_with_newline();

    let move_count = result.split_whitespace().count();
    println!("Solution: {result}");
    println!("Move count: {move_count}");
    println!("Solve time: {elapsed:?}");

    Ok(())
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::DarkYellow,
        Color::R => TermColor::Magenta,
        Color::F => TermColor::Green,
        Color::D => TermColor::White,
        Color::L => TermColor::Red,
        Color::B => TermColor::Blue,
    }
}

fn print_face(face: &[Color], offset: u16) -> Result<(), io::Error> {
    for i in 0..3 {
        let layer = format!(
            "{}  {}  {}  {}",
            SetBackgroundColor(color_to_termcolor(face[3 * i])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 1])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 2])),
            SetBackgroundColor(TermColor::Reset)
        );

        println!("{layer}");

        if offset != 0 {
            execute!(stdout(), MoveRight(offset))?;
        }
    }

    Ok(())
}

fn print_facelet(facelet: &FaceCube) -> Result<(), io::Error> {
    let stdout = stdout();

    println!();
    execute!(&stdout, MoveRight(6))?;
    print_face(&facelet.f[0..9], 6)?; // U (white)
    execute!(&stdout, MoveLeft(6))?;
    print_face(&facelet.f[36..45], 0)?; // L (orange)
    execute!(&stdout, MoveRight(6), MoveUp(3))?;
    print_face(&facelet.f[18..27], 6)?; // F (green)
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(12))?;
    print_face(&facelet.f[9..18], 12)?; // R (red)
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(18))?;
    print_face(&facelet.f[45..54], 18)?; // B (blue)
    execute!(&stdout, MoveLeft(12))?;
    print_face(&facelet.f[27..36], 6)?; // D (yellow)
    execute!(&stdout, MoveLeft(12))?;
    println!();

    Ok(())
}

fn scramble(length: usize, preview: bool) -> Result<(), Error> {
    let ss = gen_scramble(length)?;
    let cc = CubieCube::default().apply_moves(&ss);
    let fc = FaceCube::from(&cc);
    println!("Scramble: {}", scramble_to_str(&ss)?);
    if preview {
        print_facelet(&fc)?;
    }
    Ok(())
}

fn main() {
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max,
            timeout,
            preview,
        }) => solve(scramble, facelet, *max, *timeout, *preview),
        Some(Commands::Scramble { length, preview }) => scramble(*length, *preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
