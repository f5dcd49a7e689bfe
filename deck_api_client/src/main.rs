use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use deck_api_client::{parse_command, Command, DeckClient};

#[derive(Parser, Debug)]
#[command(name = "deck_api_client", version, about = "牌组服务命令行客户端")]
struct Args {
    /// 服务器地址
    #[arg(long, env = "DECK_API_URL", default_value = "http://127.0.0.1:8080")]
    server: String,
}

const HELP: &str = "\
可用命令:
  create [shuffle] [AS,KD,...]        - 创建牌组 (不指定牌码则为完整的 52 张)
  open <牌组ID>                       - 查看牌组
  draw <牌组ID> <张数> <版本号>       - 抽牌
  help                                - 显示帮助
  exit                                - 退出";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = DeckClient::new(&args.server)?;

    println!("--- 牌组客户端 ({}) ---", args.server);
    println!("{}", HELP);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(hint) => {
                println!("{}", hint);
                continue;
            }
        };

        // 请求失败只打印错误，不退出
        let output = match command {
            Command::Create { cards, shuffle } => {
                let cards: Vec<&str> = cards.iter().map(String::as_str).collect();
                client.create_deck(&cards, shuffle).await.map(|r| serde_json::to_string_pretty(&r))
            }
            Command::Open(id) => client.open_deck(id).await.map(|d| serde_json::to_string_pretty(&d)),
            Command::Draw { id, count, version } => {
                client.draw_cards(id, count, version).await.map(|c| serde_json::to_string_pretty(&c))
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Exit => {
                println!("再见");
                break;
            }
        };

        match output {
            Ok(json) => println!("{}", json?),
            Err(e) => eprintln!("请求失败: {}", e),
        }
    }

    Ok(())
}
