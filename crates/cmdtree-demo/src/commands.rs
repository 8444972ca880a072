//! The demo's command set.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::bail;
use cmdtree::{filter_fn, CommandSet, CommandSpec, Filter, Invocation, ParamKind};

/// Warps are named locations owned by the player who set them.
type Warps = Rc<RefCell<BTreeMap<String, String>>>;

/// Commands of a tiny game-server console.
#[derive(Default)]
pub struct DemoCommands {
    warps: Warps,
    maintenance: Rc<Cell<bool>>,
}

impl DemoCommands {
    pub fn new(maintenance: bool) -> Self {
        let commands = Self::default();
        commands.maintenance.set(maintenance);
        commands
    }

    fn say_hi() -> CommandSpec {
        CommandSpec::new("say hi", |inv: &Invocation<'_>| {
            inv.reply(&format!("Hi, {}!", inv.caller().name()));
        })
        .params([ParamKind::Caller])
        .console(true)
    }

    fn echo() -> CommandSpec {
        CommandSpec::new("echo", |inv: &Invocation<'_>| {
            inv.reply(&inv.args().rest().join(" "));
        })
        .params([ParamKind::RestOfArgs])
        .required_args(1)
        .help("Usage: /echo <message...>")
        .console(true)
    }

    fn warp_set(&self) -> CommandSpec {
        let warps = self.warps.clone();
        CommandSpec::new("warp set", move |inv: &Invocation<'_>| {
            let Some(name) = inv.args().str(0) else {
                return;
            };
            let mut warps = warps.borrow_mut();
            if warps.contains_key(name) {
                inv.reply(&format!("Warp \"{}\" already exists.", name));
                return;
            }
            warps.insert(name.to_string(), inv.caller().name().to_string());
            inv.reply(&format!("Warp \"{}\" set.", name));
        })
        .param(ParamKind::PlayerCaller, "player")
        .param(ParamKind::String, "name")
        .permission("warps.set")
    }

    fn warp_go(&self) -> CommandSpec {
        let warps = self.warps.clone();
        CommandSpec::new("warp go", move |inv: &Invocation<'_>| {
            let Some(name) = inv.args().str(0) else {
                return;
            };
            match warps.borrow().get(name) {
                Some(owner) => inv.reply(&format!("Warping to \"{}\" (set by {}).", name, owner)),
                None => inv.reply(&format!("No warp named \"{}\".", name)),
            }
        })
        .param(ParamKind::PlayerCaller, "player")
        .param(ParamKind::String, "name")
    }

    fn warp_list(&self) -> CommandSpec {
        let warps = self.warps.clone();
        CommandSpec::new("warp list", move |inv: &Invocation<'_>| {
            let warps = warps.borrow();
            if warps.is_empty() {
                inv.reply("No warps.");
                return;
            }
            for (name, owner) in warps.iter() {
                inv.reply(&format!("{} ({})", name, owner));
            }
        })
        .console(true)
    }

    fn give() -> CommandSpec {
        CommandSpec::new("give", |inv: &Invocation<'_>| {
            let args = inv.args();
            let Some(item) = args.str(0) else {
                bail!("item slot unbound");
            };
            let count = args.int(1).unwrap_or(1);
            if count <= 0 {
                inv.reply("Count must be positive.");
                return Ok(());
            }
            inv.reply(&format!("Gave {} x {}.", count, item));
            Ok(())
        })
        .param(ParamKind::Caller, "sender")
        .param(ParamKind::String, "item")
        .param(ParamKind::Int, "count")
        .required_args(1)
        .permission("items.give")
        .console(true)
    }

    fn op() -> CommandSpec {
        CommandSpec::new("op", |inv: &Invocation<'_>| {
            let target = inv.args().str(0).unwrap_or_default();
            inv.reply(&format!("Made {} a server operator.", target));
        })
        .param(ParamKind::String, "player")
        .permission("server.op")
        .permission_message("Only operators can do that.")
        .filter("not_in_maintenance")
        .console(true)
    }
}

impl CommandSet for DemoCommands {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![
            Self::say_hi(),
            Self::echo(),
            self.warp_set(),
            self.warp_go(),
            self.warp_list(),
            Self::give(),
            Self::op(),
        ]
    }

    fn filter(&self, name: &str) -> Option<Filter> {
        match name {
            "not_in_maintenance" => {
                let maintenance = self.maintenance.clone();
                Some(filter_fn(move |_| !maintenance.get()))
            }
            _ => None,
        }
    }
}
