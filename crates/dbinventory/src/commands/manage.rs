use colored::Colorize;
use dbinventory_store::LedgerStore;

/// Print the ledger for a human
pub fn handle(store: &LedgerStore) -> anyhow::Result<()> {
    let groups = store.list_groups()?;
    let tags = store.list_tags()?;
    let hosts = store.ledger_hosts()?;

    println!("{}", "Tag groups".bold());
    if groups.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for group in &groups {
        let members: Vec<&str> = tags
            .iter()
            .filter(|t| t.group_id == group.id)
            .map(|t| t.name.as_str())
            .collect();
        println!(
            "  {} [{}] {}",
            group.name.cyan(),
            group.selection_type,
            members.join(", ")
        );
    }

    println!();
    println!("{}", "Hosts".bold());
    if hosts.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for ledger_host in &hosts {
        let host = &ledger_host.host;
        let mut line = format!("  {} {}", host.host.green(), host.display_name());

        if let Some(user) = &host.ssh_user {
            line.push_str(&format!(" {}", format!("user={}", user).dimmed()));
        }
        if let Some(port) = host.ssh_port {
            line.push_str(&format!(" {}", format!("port={}", port).dimmed()));
        }
        if store.has_host_secret(host.id)? {
            line.push_str(&format!(" {}", "🔑".yellow()));
        }
        println!("{}", line);

        if !ledger_host.tags.is_empty() {
            let names: Vec<String> = ledger_host
                .tags
                .iter()
                .map(|t| format!("{}:{}", t.group, t.tag))
                .collect();
            println!("    {}", names.join(", "));
        }
    }

    Ok(())
}
