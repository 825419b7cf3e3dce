//! Plain-text rendering of triage results.

use triage_core::EnrichmentResult;
use triage_store::Ticket;

pub fn print_result(result: &EnrichmentResult) {
    println!("category:        {}", result.category.as_str());
    println!("priority:        {}", result.priority.as_str());
    println!("sentiment:       {}", result.sentiment.as_str());
    println!("confidence:      {:.2}", result.confidence);
    println!("summary:         {}", result.summary);
    println!("suggested reply: {}", result.suggested_reply);
}

pub fn print_ticket(ticket: &Ticket) {
    println!("ticket #{} [{:?}]", ticket.id, ticket.status);
    println!("title:           {}", ticket.title);
    println!("category:        {}", ticket.category.as_str());
    println!("priority:        {}", ticket.priority.as_str());
    println!("sentiment:       {}", ticket.sentiment.as_str());
    println!("confidence:      {:.2}", ticket.confidence);
    println!("summary:         {}", ticket.summary);
    println!("suggested reply: {}", ticket.suggested_reply);
}
