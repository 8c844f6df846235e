#[tokio::main]
async fn main() {
    std::process::exit(mde_ui_terminal::main_exit().await);
}
