use deck_api_core::DeckId;

/// 命令行里输入的一条指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// create [shuffle] [AS,KD,...]
    Create { cards: Vec<String>, shuffle: bool },
    /// open <牌组ID>
    Open(DeckId),
    /// draw <牌组ID> <张数> <版本号>
    Draw { id: DeckId, count: usize, version: u64 },
    Help,
    Exit,
}

/// 解析一行输入，失败时返回给用户看的提示
pub fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.first().copied() {
        Some("create") => {
            let mut shuffle = false;
            let mut cards = Vec::new();
            for part in &parts[1..] {
                if part.eq_ignore_ascii_case("shuffle") {
                    shuffle = true;
                } else {
                    cards.extend(part.split(',').filter(|c| !c.is_empty()).map(str::to_uppercase));
                }
            }
            Ok(Command::Create { cards, shuffle })
        }
        Some("open") => {
            let [_, id] = parts.as_slice() else {
                return Err("用法: open <牌组ID>".to_string());
            };
            Ok(Command::Open(parse_id(id)?))
        }
        Some("draw") => {
            let [_, id, count, version] = parts.as_slice() else {
                return Err("用法: draw <牌组ID> <张数> <版本号>".to_string());
            };
            let count = count.parse::<usize>().map_err(|_| format!("无效的张数: {}", count))?;
            let version = version.parse::<u64>().map_err(|_| format!("无效的版本号: {}", version))?;
            Ok(Command::Draw { id: parse_id(id)?, count, version })
        }
        Some("help") => Ok(Command::Help),
        Some("exit") => Ok(Command::Exit),
        Some(other) => Err(format!("未知命令: {}", other)),
        None => Err("请输入命令".to_string()),
    }
}

fn parse_id(id: &str) -> Result<DeckId, String> {
    DeckId::parse_str(id).map_err(|e| format!("无效的牌组ID格式: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        assert_eq!(parse_command("create"), Ok(Command::Create { cards: vec![], shuffle: false }));
        assert_eq!(
            parse_command("create shuffle as,kd"),
            Ok(Command::Create { cards: vec!["AS".into(), "KD".into()], shuffle: true })
        );
    }

    #[test]
    fn test_parse_open_and_draw() {
        let id = DeckId::new_v4();
        assert_eq!(parse_command(&format!("open {}", id)), Ok(Command::Open(id)));
        assert_eq!(
            parse_command(&format!("draw {} 3 1", id)),
            Ok(Command::Draw { id, count: 3, version: 1 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("open").is_err());
        assert!(parse_command("open id123").is_err());
        assert!(parse_command(&format!("draw {} x 0", DeckId::new_v4())).is_err());
        assert!(parse_command("shuffle").is_err());
        assert!(parse_command("   ").is_err());
        assert_eq!(parse_command("exit"), Ok(Command::Exit));
    }
}
