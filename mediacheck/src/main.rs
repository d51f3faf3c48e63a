use mediacheck::{command_argument_builder, handle_check};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    let code = handle_check(&matches).await;
    std::process::exit(code);
}
