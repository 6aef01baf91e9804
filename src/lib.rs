//  _  __           ____            __ _
// | |/ /___ _   _ / ___|_ __ __ _ / _| |_
// | ' // _ \ | | | |   | '__/ _` | |_| __|
// | . \  __/ |_| | |___| | | (_| |  _| |_
// |_|\_\___|\__, |\____|_|  \__,_|_|  \__|
//           |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Password and passphrase generation library.

pub mod configtool;
pub mod passgen;
pub mod session;
pub mod setclip;
pub mod wordsource;
