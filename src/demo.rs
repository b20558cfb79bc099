//! 按固定脚本演示链表的各项操作，并把过程打印出来

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};

use crate::list::List;
use crate::printer::print_list;
use crate::probe::{LifecycleEvent, LifecycleObserver, LifecycleProbe};

const FILES_COUNT: usize = 3;
const SOME_SIZE: usize = 3;

fn file_list(names: &[&str]) -> List<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// 把探针事件写进演示输出，与脚本自己的输出交错在一起
///
/// 析构时无法返回错误，所以只记下第一个写入失败，由 [`ListDemo`] 在步骤之间检查。
struct WriterObserver<W> {
    out: Rc<RefCell<W>>,
    failure: Rc<RefCell<Option<io::Error>>>,
}

impl<W> WriterObserver<W> {
    fn record(&self, error: io::Error) {
        warn!("Failed to report lifecycle event: {error}");
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(error);
        }
    }
}

impl<W: Write> LifecycleObserver for WriterObserver<W> {
    fn notify(&self, event: LifecycleEvent) {
        let result = match self.out.try_borrow_mut() {
            Ok(mut out) => writeln!(out, "{}", event),
            Err(_) => Err(io::Error::other(format!(
                "output is busy, dropped lifecycle event {event:?}"
            ))),
        };
        if let Err(e) = result {
            self.record(e);
        }
    }
}

pub struct ListDemo<W: Write> {
    out: Rc<RefCell<W>>,
    observer_failure: Rc<RefCell<Option<io::Error>>>,
}

impl<W: Write + 'static> ListDemo<W> {
    pub fn new(out: W) -> Self {
        ListDemo {
            out: Rc::new(RefCell::new(out)),
            observer_failure: Rc::new(RefCell::new(None)),
        }
    }

    /// 运行完整脚本
    pub fn run(&self) -> Result<()> {
        let mut files = file_list(&["1.mp3", "2.mp3", "3.mp3", "4.mp3", "5.mp3"]);

        self.investigate_capacity(&files)
            .context("capacity operations")?;
        self.investigate_access(&files)
            .context("element access")?;
        self.investigate_modifiers(&mut files)
            .context("modifiers")?;
        // 探针全部在这一步中创建和析构
        self.check_observer().context("modifiers")?;
        self.investigate_operations()
            .context("list operations")?;

        self.check_observer()?;
        self.out
            .borrow_mut()
            .flush()
            .context("Failed to flush demo output")
    }

    /// 取回输出目标
    pub fn into_inner(self) -> Result<W> {
        Rc::try_unwrap(self.out)
            .map(RefCell::into_inner)
            .map_err(|_| anyhow!("Demo output is still shared"))
    }

    fn investigate_capacity(&self, data: &List<String>) -> Result<()> {
        info!("Investigating capacity operations");

        self.say(format_args!("File list size: {}", data.len()))?;
        self.say(format_args!("File list max size: {}", data.max_len()))?;

        if data.is_empty() {
            self.say(format_args!("File list is empty!"))
        } else {
            self.say(format_args!("File list is not empty. "))
        }
    }

    fn investigate_access(&self, data: &List<String>) -> Result<()> {
        info!("Investigating element access");

        self.say(format_args!("First element: {}", data.front()?))?;
        self.say(format_args!("Last element: {}", data.back()?))?;

        let start = data.cursor_front().advanced(2)?;
        self.say(format_args!("{}", start.get()?))
    }

    fn investigate_modifiers(&self, data: &mut List<String>) -> Result<()> {
        info!("Investigating modifiers");

        data.clear();
        self.say(format_args!("List cleared! It's size now is {}", data.len()))?;

        for i in 0..FILES_COUNT {
            data.push_back(format!("{}.mp3", i));
            self.say(format_args!("Appended [{}]/[{}] ", i + 1, FILES_COUNT))?;
        }
        self.blank_lines(2)?;

        let observer = self.observer();

        let mut some_data = List::new();
        for i in 0..SOME_SIZE {
            let observer = Rc::clone(&observer);
            some_data.emplace_back(|| LifecycleProbe::with_tag(i, observer));
            self.say(format_args!("Emplaced [{}]/[{}] ", i + 1, SOME_SIZE))?;
        }
        self.blank_lines(2)?;

        let mut some_data2 = List::new();
        for i in 0..SOME_SIZE {
            let some_object = LifecycleProbe::with_tag(i, Rc::clone(&observer));
            some_data2.push_back(some_object.clone());
            self.say(format_args!("Pushed [{}]/[{}] ", i + 1, SOME_SIZE))?;
        }
        self.blank_lines(2)?;
        debug!(
            "Probe lists hold {} and {} elements",
            some_data.len(),
            some_data2.len()
        );

        for i in 0..FILES_COUNT / 2 {
            data.pop_back()?;
            self.say(format_args!("Popped [{}]/[{}] ", i + 1, FILES_COUNT / 2))?;
        }
        self.blank_lines(2)?;

        self.say(format_args!("Before insertion: "))?;
        self.print(data)?;

        self.say(format_args!("After insertion: "))?;
        let discovered_file = String::from("newfile.jpg");
        data.cursor_front_mut()
            .advanced(2)?
            .insert(discovered_file);
        self.print(data)?;

        self.say(format_args!("After emplace insertion: "))?;
        data.cursor_front_mut()
            .advanced(3)?
            .emplace(|| String::from("newfile.png"));
        self.print(data)?;

        let mut new_discoverage = file_list(&[".gitignore", "hellolist.cpp", "Makefile"]);
        self.say(format_args!("New discoverage content: "))?;
        self.print(&new_discoverage)?;

        let mut old_discoverage = data.clone();
        old_discoverage.resize(3);
        self.say(format_args!("Old discoverage content: "))?;
        self.print(&old_discoverage)?;
        self.say(format_args!("After swapping, oldDiscoverage content: "))?;

        new_discoverage.swap(&mut old_discoverage);
        self.print(&old_discoverage)?;

        old_discoverage.cursor_front_mut().erase()?;
        self.say(format_args!(
            "After erasing first element old discoverage is: "
        ))?;
        self.print(&old_discoverage)?;

        self.say(format_args!("Pushing and emplacing front coverart"))?;
        old_discoverage.push_front(String::from("coverart.jpg"));
        old_discoverage.emplace_front(|| String::from("coverart.png"));
        self.print(&old_discoverage)?;

        self.say(format_args!("Pop front coverart"))?;
        old_discoverage.pop_front()?;
        self.print(&old_discoverage)?;

        // 离开作用域时 some_data2 先于 some_data 析构
        Ok(())
    }

    fn investigate_operations(&self) -> Result<()> {
        info!("Investigating list operations");

        let mut files = file_list(&[
            "hello.h",
            "world.png",
            "we.jpg",
            "are.wav",
            "investigating.iso",
            "list.cpp",
        ]);
        self.say(format_args!("File list 1 content: "))?;
        self.print(&files)?;

        let mut files2 = file_list(&["hello.h", "hellotest.wmv"]);
        self.say(format_args!("File list 2 content:  "))?;
        self.print(&files2)?;

        // 合并之前两个链表都必须是升序
        files.sort();
        files2.sort();

        files.merge(&mut files2);
        debug!("Merged list holds {} elements", files.len());

        self.say(format_args!("Merged into file list 1, result content: "))?;
        self.print(&files)?;

        self.say(format_args!("File list 2 content:  "))?;
        self.print(&files2)?;

        self.say(format_args!("Add some data to fileList2:"))?;
        files2.assign(3, String::from("test.cxx"));
        self.print(&files2)?;

        files.cursor_front_mut().splice(&mut files2);

        self.say(format_args!("Spliced into file list 1, result content: "))?;
        self.print(&files)?;
        self.say(format_args!("File list 2 content:  "))?;
        self.print(&files2)?;

        self.say(format_args!("Removing duplicate entries..."))?;
        let removed = files.unique();
        debug!("Removed {} duplicate entries", removed);
        self.print(&files)?;

        self.say(format_args!("Reversing entries..."))?;
        files.reverse();
        self.print(&files)?;

        self.say(format_args!("Removing list.cpp entry..."))?;
        files.remove(&String::from("list.cpp"));
        self.print(&files)?;

        files.cursor_front_mut().insert_n(3, String::new());
        self.say(format_args!("Adding some empty entries, result: "))?;
        self.print(&files)?;

        self.say(format_args!("Removing empty entries"))?;
        files.remove_if(|entry| entry.is_empty());
        self.print(&files)
    }

    fn observer(&self) -> Rc<dyn LifecycleObserver> {
        Rc::new(WriterObserver {
            out: Rc::clone(&self.out),
            failure: Rc::clone(&self.observer_failure),
        })
    }

    /// 取出探针事件写入时记录的第一个错误
    fn check_observer(&self) -> Result<()> {
        match self.observer_failure.borrow_mut().take() {
            Some(error) => Err(error).context("Failed to write lifecycle event"),
            None => Ok(()),
        }
    }

    fn say(&self, line: fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.out.borrow_mut(), "{}", line).context("Failed to write demo output")
    }

    fn blank_lines(&self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.say(format_args!(""))?;
        }
        Ok(())
    }

    fn print(&self, list: &List<String>) -> Result<()> {
        print_list(&mut *self.out.borrow_mut(), list, &String::new())
            .context("Failed to print list")
    }
}
