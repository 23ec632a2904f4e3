use std::process::exit;

use crate::error;
use crate::hand::analyze_hand_str;
use crate::util::misc::{error_exit, next_value};

// 手牌解析アプリ
// 例: shanten A 234567m23456p66s
//     shanten A -j 1122345588899m (構造化結果をJSONで出力)
//     shanten A -f hands.txt (ファイルの各行を解析)
#[derive(Debug)]
pub struct AnalyzerApp {
    exp: String,
    file_path: String,
    json: bool,
}

impl AnalyzerApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            exp: "".to_string(),
            file_path: "".to_string(),
            json: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-j" => app.json = true,
                "-f" => {
                    app.file_path = next_value(&mut it, "-f");
                }
                exp => {
                    if exp.starts_with('-') {
                        error!("unknown option: {}", exp);
                        exit(1);
                    }
                    app.exp = s.clone();
                }
            }
        }

        app
    }

    pub fn run(&self) {
        let mut exps = vec![];
        if !self.file_path.is_empty() {
            let data = match std::fs::read_to_string(&self.file_path) {
                Ok(data) => data,
                Err(e) => error_exit(e),
            };
            for line in data.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    exps.push(line.to_string());
                }
            }
        }
        if !self.exp.is_empty() {
            exps.push(self.exp.clone());
        }
        if exps.is_empty() {
            error!("hand expression not specified");
            exit(1);
        }

        for (i, exp) in exps.iter().enumerate() {
            let res = match analyze_hand_str(exp) {
                Ok(res) => res,
                Err(e) => error_exit(e),
            };

            if i > 0 {
                println!();
            }
            if self.json {
                println!("{}", serde_json::to_string_pretty(&res).unwrap());
            } else {
                for l in &res.lines {
                    println!("{}", l);
                }
            }
        }
    }
}
