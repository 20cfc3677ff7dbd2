mod highlight;
mod report;

use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use clap::{ArgAction, CommandFactory, Parser};
use jsoncut::{CutOptions, CutRequest, Output, View};
use serde::Serialize;
use serde_json::Value;

use crate::highlight::highlight_json;
use crate::report::Palette;

#[derive(Parser, Debug)]
#[command(
    name = "jsoncut",
    version,
    about = "Quickly select or filter out properties in a JSON document"
)]
struct Args {
    /// Input JSON file. Omit or use '-' to read from stdin.
    jsonfile: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Set the root of the JSON document.
    #[arg(short = 'r', long = "root", value_name = "keys")]
    rootkey: Option<String>,

    /// Get JSON key-values and/or elements.
    #[arg(short = 'g', long = "get", value_name = "keys")]
    getkeys: Option<String>,

    /// Same as get, but uses the default value when a key is not found.
    #[arg(
        short = 'G',
        long = "getdefault",
        num_args = 2,
        value_names = ["keys", "default"],
        action = ArgAction::Append
    )]
    getdefaults: Vec<String>,

    /// Set JSON key-values and/or elements.
    #[arg(
        short = 'S',
        long = "set",
        num_args = 2,
        value_names = ["keys", "value"],
        action = ArgAction::Append
    )]
    setkeys: Vec<String>,

    /// Delete JSON keys and/or indexes.
    #[arg(short = 'd', long = "del", value_name = "keys")]
    delkeys: Option<String>,

    /// Get/del any matching keys; suppress key not found errors.
    #[arg(short, long)]
    any: bool,

    /// Numbered JSON keys list.
    #[arg(short, long)]
    list: bool,

    /// Inspect the JSON document; all keys, indexes and types.
    #[arg(short, long)]
    inspect: bool,

    /// Count elements in top-level JSON arrays.
    #[arg(short, long)]
    count: bool,

    /// Flatten the given keys; all keys when the value is 0 or omitted.
    #[arg(short = 'F', long, value_name = "keys", num_args = 0..=1, default_missing_value = "0")]
    flatten: Option<String>,

    /// Generate flattened rows from the records below this key.
    #[arg(long, value_name = "key")]
    rows: Option<String>,

    /// Keys of the whole document prepended to every row.
    #[arg(long, value_name = "keys", requires = "rows")]
    prepend: Option<String>,

    /// Deep inspection; crawl every array element.
    #[arg(short, long)]
    fullscan: bool,

    /// Preserve the full path for names.
    #[arg(short = 'p', long)]
    fullpath: bool,

    /// Quoting character for keys.
    #[arg(short, long = "quotechar", value_name = "char", default_value_t = jsoncut::DEFAULT_QUOTE_CHAR)]
    quotechar: char,

    /// Indent JSON output; compact when redirecting unless set.
    #[arg(short = 'I', long, value_name = "number")]
    indent: Option<usize>,

    /// Disable syntax highlighting.
    #[arg(short, long)]
    nocolor: bool,

    /// Treat a root array as one document instead of a sequence of records.
    #[arg(short, long)]
    slice: bool,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> CutOptions {
        CutOptions::new()
            .with_quote_char(self.quotechar)
            .with_fullscan(self.fullscan)
            .with_fullpath(self.fullpath)
            .with_any(self.any)
            .with_slice(self.slice)
    }

    fn request(&self) -> CutRequest {
        let mut request = CutRequest::new().with_view(self.view());
        if let Some(keys) = &self.rootkey {
            request = request.with_rootkey(keys);
        }
        if let Some(keys) = &self.getkeys {
            request = request.with_get(keys);
        }
        for pair in self.getdefaults.chunks_exact(2) {
            request = request.with_default(&pair[0], &pair[1]);
        }
        for pair in self.setkeys.chunks_exact(2) {
            request = request.with_set(&pair[0], &pair[1]);
        }
        if let Some(keys) = &self.delkeys {
            request = request.with_del(keys);
        }
        request
    }

    fn view(&self) -> View {
        if self.inspect {
            View::Inspect
        } else if self.list {
            View::List
        } else if self.count {
            View::Count
        } else if let Some(rootkey) = &self.rows {
            View::Rows {
                rootkey: rootkey.clone(),
                prepend: self.prepend.clone(),
            }
        } else if let Some(keys) = &self.flatten {
            View::Flatten(Some(keys.clone()))
        } else {
            View::Document
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    let palette = Palette::new(!args.nocolor && io::stderr().is_terminal());

    if let Err(err) = run(&args) {
        let text = match err.downcast_ref::<jsoncut::Error>() {
            Some(err) => report::error_block(err, &palette),
            None => report::headline(failure_name(err.as_ref()), &err.to_string(), &palette),
        };
        eprint!("{text}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn failure_name(err: &(dyn Error + 'static)) -> &'static str {
    if err.is::<serde_json::Error>() {
        "JSONDecodeError"
    } else if err.is::<io::Error>() {
        "IOError"
    } else {
        "Error"
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if args.jsonfile.is_none() && io::stdin().is_terminal() {
        Args::command().print_help()?;
        return Ok(());
    }
    let input = read_input(args.jsonfile.as_deref())?;
    let document: Value = serde_json::from_str(&input)?;
    log::info!("read {} bytes of JSON", input.len());

    let output = jsoncut::cut(document, &args.request(), &args.options())?;
    let target = OutputTarget::from_arg(args.output.as_deref());
    let to_terminal = matches!(target, OutputTarget::Stdout) && io::stdout().is_terminal();
    let palette = Palette::new(!args.nocolor && to_terminal);

    with_output_writer(target.path(), |writer| match &output {
        Output::Document(value) => {
            let indent = match args.indent {
                Some(indent) => indent,
                None if to_terminal => 2,
                None => 0,
            };
            let text = json_text(value, indent)?;
            writeln!(writer, "{}", highlight_json(&text, &palette))?;
            Ok(())
        }
        Output::Keys(keys) => {
            let lines = keys.iter().map(|key| report::listed_key(key, &palette));
            write_lines(writer, lines)
        }
        Output::Inspection(keys) => write_lines(writer, report::inspection(keys, &palette)),
        Output::Counts(Some(counts)) => write_lines(writer, report::counts(counts, &palette)),
        Output::Counts(None) => Ok(()),
    })
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_lines<I>(writer: &mut dyn Write, lines: I) -> Result<(), Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn json_text(value: &Value, indent: usize) -> Result<String, Box<dyn Error>> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
