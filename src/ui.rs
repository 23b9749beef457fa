pub fn render_index(today: &str) -> String {
    INDEX_HTML.replace("{{TODAY}}", today)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Клиенты</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --muted: #7a746d;
      --accent: #2f4858;
      --danger: #c63b2b;
      --card: #ffffff;
      --line: rgba(47, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 16px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    section {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 18px 20px;
      display: grid;
      gap: 12px;
    }

    h1, h2 {
      margin: 0;
    }

    h3 {
      margin: 8px 0 4px;
      font-size: 1rem;
      color: var(--accent);
    }

    .muted {
      color: var(--muted);
    }

    ul.clients {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    ul.clients li {
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 8px 12px;
      cursor: pointer;
    }

    ul.clients li:hover {
      border-color: var(--accent);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 10px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    input, select {
      font: inherit;
      padding: 8px 10px;
      border: 1px solid var(--line);
      border-radius: 8px;
    }

    button {
      font: inherit;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    button.danger {
      background: var(--danger);
    }

    .actions {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Клиенты</h1>
      <p class="muted">Сегодня: {{TODAY}}</p>
      <p class="status" id="status"></p>
    </header>

    <section>
      <h2>ТО на ближайшие 7 дней</h2>
      <div id="upcoming"></div>
    </section>

    <section>
      <h2>По месяцам</h2>
      <select id="month"></select>
      <div id="month-groups"></div>
    </section>

    <section>
      <h2>Поиск</h2>
      <input id="search" placeholder="Введите текст для поиска" />
      <div id="search-results" class="muted">Начните вводить текст...</div>
    </section>

    <section>
      <h2>Добавить клиента</h2>
      <form id="add-form" class="grid"></form>
      <div class="actions">
        <button type="submit" form="add-form">Добавить клиента</button>
      </div>
    </section>

    <section id="detail" hidden>
      <h2 id="detail-title"></h2>
      <form id="detail-form" class="grid"></form>
      <div class="actions">
        <button type="button" id="save-btn">Сохранить</button>
        <button type="button" id="close-btn">Закрыть</button>
        <button type="button" id="delete-btn" class="danger">Удалить</button>
      </div>
    </section>
  </main>

  <script>
    const FORM_FIELDS = [
      'ФИО', 'Телефон', 'Область', 'Район', 'Наименование населенного пункта',
      'Улица', '№ Дома', '№ Квартиры', 'Модель', 'Серийный номер котла',
      'Дата ТО', 'Дата планируемого ТО', 'Исполнитель', 'Примечание'
    ];
    const TOKEN_KEY = 'clientsAccessToken';

    const statusEl = document.getElementById('status');
    const upcomingEl = document.getElementById('upcoming');
    const monthEl = document.getElementById('month');
    const monthGroupsEl = document.getElementById('month-groups');
    const searchEl = document.getElementById('search');
    const searchResultsEl = document.getElementById('search-results');
    const addForm = document.getElementById('add-form');
    const detailEl = document.getElementById('detail');
    const detailTitle = document.getElementById('detail-title');
    const detailForm = document.getElementById('detail-form');

    let current = null;
    let searchTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeHtml = (value) => String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;');

    const api = async (path, options = {}, retried = false) => {
      const headers = { 'content-type': 'application/json', ...(options.headers || {}) };
      const token = localStorage.getItem(TOKEN_KEY);
      if (token) {
        headers.authorization = `Bearer ${token}`;
      }
      const res = await fetch(path, { ...options, headers });
      if (res.status === 401 && !retried) {
        const entered = prompt('Токен доступа');
        if (entered) {
          localStorage.setItem(TOKEN_KEY, entered);
          return api(path, options, true);
        }
      }
      if (!res.ok) {
        throw new Error((await res.text()) || 'Ошибка запроса');
      }
      return res.status === 204 ? null : res.json();
    };

    const renderList = (clients) => `<ul class="clients">${clients
      .map((c) => `<li data-id="${escapeHtml(c.id)}">${escapeHtml(c['ФИО'] || 'Без имени')}` +
        ` <span class="muted">${escapeHtml(c['Телефон'] || '')}</span></li>`)
      .join('')}</ul>`;

    const renderGroups = (groups) => {
      const dates = Object.keys(groups).sort();
      if (!dates.length) {
        return '<p class="muted">Нет клиентов</p>';
      }
      return dates.map((date) => `<h3>${escapeHtml(date)}</h3>${renderList(groups[date])}`).join('');
    };

    const fieldInputs = (values) => FORM_FIELDS
      .concat(Object.keys(values).filter((k) => k !== 'id' && !FORM_FIELDS.includes(k)))
      .map((name) => {
        const type = name.includes('Дата') ? 'date' : 'text';
        return `<label>${escapeHtml(name)}<input type="${type}" name="${escapeHtml(name)}"` +
          ` value="${escapeHtml(values[name] || '')}" /></label>`;
      })
      .join('');

    const formValues = (form) => Object.fromEntries(
      Array.from(form.querySelectorAll('input')).map((input) => [input.name, input.value.trim()])
    );

    const loadUpcoming = async () => {
      upcomingEl.innerHTML = renderGroups(await api('/api/upcoming'));
    };

    const loadMonthGroups = async () => {
      if (!monthEl.value) {
        monthGroupsEl.innerHTML = '<p class="muted">Нет клиентов</p>';
        return;
      }
      monthGroupsEl.innerHTML = renderGroups(await api(`/api/months/${encodeURIComponent(monthEl.value)}`));
    };

    const loadMonths = async () => {
      const selected = monthEl.value;
      const months = await api('/api/months');
      monthEl.innerHTML = months
        .map((m) => `<option value="${escapeHtml(m.value)}">${escapeHtml(m.label)}</option>`)
        .join('');
      const thisMonth = '{{TODAY}}'.slice(0, 7);
      const keep = months.find((m) => m.value === selected) || months.find((m) => m.value === thisMonth);
      if (keep) {
        monthEl.value = keep.value;
      }
      await loadMonthGroups();
    };

    const runSearch = async () => {
      const query = searchEl.value.trim();
      if (!query) {
        searchResultsEl.innerHTML = 'Начните вводить текст...';
        return;
      }
      const found = await api(`/api/search?q=${encodeURIComponent(query)}`);
      searchResultsEl.innerHTML = found.clients.length ? renderList(found.clients) : 'Ничего не найдено';
    };

    const refresh = () => Promise.all([loadUpcoming(), loadMonths(), runSearch()]);

    const openClient = async (id) => {
      current = await api(`/api/clients/${encodeURIComponent(id)}`);
      detailTitle.textContent = current['ФИО'] || 'Без имени';
      detailForm.innerHTML = fieldInputs(current);
      detailEl.hidden = false;
      detailEl.scrollIntoView({ behavior: 'smooth' });
    };

    document.body.addEventListener('click', (event) => {
      const item = event.target.closest('li[data-id]');
      if (item) {
        openClient(item.dataset.id).catch((err) => setStatus(err.message, 'error'));
      }
    });

    monthEl.addEventListener('change', () => {
      loadMonthGroups().catch((err) => setStatus(err.message, 'error'));
    });

    searchEl.addEventListener('input', () => {
      clearTimeout(searchTimer);
      searchTimer = setTimeout(() => runSearch().catch((err) => setStatus(err.message, 'error')), 500);
    });

    addForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        await api('/api/clients', { method: 'POST', body: JSON.stringify(formValues(addForm)) });
        addForm.reset();
        setStatus('Клиент успешно добавлен!', 'ok');
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('save-btn').addEventListener('click', async () => {
      try {
        current = await api(`/api/clients/${encodeURIComponent(current.id)}`, {
          method: 'PUT',
          body: JSON.stringify(formValues(detailForm))
        });
        setStatus('Данные клиента успешно обновлены!', 'ok');
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('delete-btn').addEventListener('click', async () => {
      if (!current || !confirm('Удалить клиента?')) {
        return;
      }
      try {
        await api(`/api/clients/${encodeURIComponent(current.id)}`, { method: 'DELETE' });
        detailEl.hidden = true;
        current = null;
        setStatus('Клиент успешно удален!', 'ok');
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('close-btn').addEventListener('click', () => {
      detailEl.hidden = true;
      current = null;
    });

    addForm.innerHTML = fieldInputs({});
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
