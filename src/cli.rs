// Copyright 2026 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "campuschat")]
#[command(version, author = "Muvon Un Limited <opensource@muvon.io>")]
#[command(about = "Knowledge-driven chat assistant for the City College of Bayawan website", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// Question text
        question: Vec<String>,
    },

    /// Load every dynamic source and report per-source entry counts
    Sources,

    /// Inspect or reset the persisted conversation
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Show the session id, message count, and open flag
    Show,

    /// Forget the stored conversation (the session id is kept)
    Clear,
}
