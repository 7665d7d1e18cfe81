use carved_mazes::{
    generators,
    grid::Grid,
    grid_dimensions::MazeDimensions,
    grid_displays,
    pathing,
};
use docopt::Docopt;
use error_chain::bail;
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    env,
    fs::{self, File},
    io,
    io::prelude::*,
    process,
};

const USAGE: &str = "Carved mazes

Usage:
    carve_and_solve -h | --help
    carve_and_solve [--rows=<r> --columns=<c>] [--seed=<n>] [--save-edges=<path>]
    carve_and_solve solve --maze-file=<path>

Options:
    -h --help              Show this screen.
    --rows=<r>             Rows of maze cells, not counting walls. Asked for on stdin if not given.
    --columns=<c>          Columns of maze cells, not counting walls. Asked for on stdin if not given.
    --seed=<n>             Seed the random choices made while carving, for a reproducible maze.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --maze-file=<path>     Solve a maze previously printed by this program instead of carving a new one.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: Option<i64>,
    flag_columns: Option<i64>,
    flag_seed: Option<u64>,
    flag_save_edges: String,
    cmd_solve: bool,
    flag_maze_file: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            ParseInt(::std::num::ParseIntError);
            Dimensions(carved_mazes::grid_dimensions::DimensionsError);
            GridParse(carved_mazes::grid_displays::GridParseError);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn parse_args<I, S>(argv: I) -> ::std::result::Result<MazeArgs, docopt::Error>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())
}

fn run() -> Result<()> {

    let args = parse_args(env::args()).unwrap_or_else(|e| e.exit());

    let mut maze_grid = if args.cmd_solve {
        load_maze(&args.flag_maze_file)?
    } else {
        let stdin = io::stdin();
        let dimensions = requested_dimensions(&args, stdin.lock())?;
        let mut rng = maze_rng(args.flag_seed);
        generators::carve_maze(dimensions, &mut rng)
    };

    print!("{}", maze_grid);
    println!();

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let (start, end) = (maze_grid.entrance_coordinate(), maze_grid.exit_coordinate());
    if pathing::solve(&mut maze_grid, start, end) {
        print!("{}", maze_grid);
    } else {
        // Not an error, the maze just has no way through.
        println!("No solution found!");
    }

    Ok(())
}

/// Dimensions from the command line, or from `input` after a prompt when neither is given.
fn requested_dimensions<B: BufRead>(maze_args: &MazeArgs, input: B) -> Result<MazeDimensions> {

    let (rows, columns) = match (maze_args.flag_rows, maze_args.flag_columns) {
        (Some(rows), Some(columns)) => (rows, columns),
        (None, None) => {
            print!("Enter the maze dimensions (rows and columns): ");
            io::stdout().flush()?;
            read_dimensions(input)?
        }
        _ => bail!("--rows and --columns must be given together"),
    };

    Ok(MazeDimensions::for_maze_cells(rows, columns)?)
}

/// Read the rows and columns. The two numbers may be on one line or several.
fn read_dimensions<B: BufRead>(input: B) -> Result<(i64, i64)> {

    let mut numbers = vec![];
    for line in input.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let number = token.parse::<i64>()
                .chain_err(|| format!("'{}' is not a whole number", token))?;
            numbers.push(number);
        }
        if numbers.len() >= 2 {
            break;
        }
    }

    match numbers.as_slice() {
        [rows, columns, ..] => Ok((*rows, *columns)),
        _ => bail!("expected two numbers for the maze rows and columns"),
    }
}

fn maze_rng(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => {
            info!("carving with seed {}", s);
            XorShiftRng::seed_from_u64(s)
        }
        None => XorShiftRng::from_entropy(),
    }
}

fn load_maze(file_path: &str) -> Result<Grid> {
    let text = fs::read_to_string(file_path)
        .chain_err(|| format!("Failed to read maze file {}", file_path))?;
    unsolved_maze(&text, file_path)
}

/// Parse a rendered maze, reopening any route already marked on it.
fn unsolved_maze(text: &str, source: &str) -> Result<Grid> {
    let mut maze_grid = grid_displays::parse_grid(text)
        .chain_err(|| format!("Failed to parse maze file {}", source))?;

    let cleared = maze_grid.clear_path();
    if cleared > 0 {
        info!("cleared {} path marks from {}", cleared, source);
    }
    Ok(maze_grid)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {
    write_text_to_file(&maze_graph_text(maze_grid), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

/// Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices, 1-based vertex indices
/// numbering the carved maze nodes in row-major order.
fn maze_graph_text(maze_grid: &Grid) -> String {

    let graph = maze_grid.to_graph();

    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    graph_data
}
