use fieldgate_wire::Decoded;

use crate::cmd::DecodeArgs;
use crate::exit::{wire_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = args.frame.trim_end_matches('\n');

    match fieldgate_wire::decode(frame.as_bytes()) {
        Ok(Decoded::Report(report)) => {
            print_report(&report, format);
            Ok(SUCCESS)
        }
        Ok(Decoded::Ignored) => Err(CliError::new(
            DATA_INVALID,
            "frame has no recognized direction tag (the session would drop it silently)",
        )),
        Err(err) => Err(wire_error("decode failed", err)),
    }
}
