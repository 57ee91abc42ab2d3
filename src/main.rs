use std::io;

use gdal_batch::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let input_dir = process_args(args)?;
    log::info!("程式執行完成，輸入目錄：{}", input_dir);
    println!("批次處理完成！處理目錄：{}", input_dir);
    Ok(())
}
